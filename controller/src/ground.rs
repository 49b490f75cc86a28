use crate::{
    config::ControllerConfig,
    constants::GROUND_ANCHOR_CLEARANCE,
    host::GroundProbe,
    layers::LayerMask,
    types::{CapsuleSpec, Pose, Vec3},
};

/// Grounded test anchored at the character's feet.
///
/// The anchor is an entity-local offset, rotated with the pose before the
/// overlap query is issued.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundCheck {
    pub anchor_offset: Vec3,
    pub radius: f32,
    pub mask: LayerMask,
}

impl GroundCheck {
    /// Build the check from config, deriving the anchor from `capsule` when the
    /// config leaves it unset.
    pub fn from_config(config: &ControllerConfig, capsule: CapsuleSpec) -> Self {
        let anchor_offset = config
            .ground_anchor
            .unwrap_or_else(|| derived_anchor_offset(capsule, config.skin_width));
        Self {
            anchor_offset,
            radius: config.ground_radius,
            mask: config.ground_mask,
        }
    }

    /// World-space center of the ground sphere for `pose`.
    #[inline]
    pub fn anchor(&self, pose: &Pose) -> Vec3 {
        pose.translation + pose.rotation * self.anchor_offset
    }

    pub fn is_grounded<G: GroundProbe + ?Sized>(&self, probe: &G, pose: &Pose) -> bool {
        probe.overlap_sphere(self.anchor(pose), self.radius, self.mask)
    }
}

/// Foot anchor just above the bottom of the capsule: half the height down,
/// lifted by the skin and a small clearance.
#[inline]
pub fn derived_anchor_offset(capsule: CapsuleSpec, skin_width: f32) -> Vec3 {
    Vec3::new(
        0.0,
        -capsule.height() * 0.5 + skin_width + GROUND_ANCHOR_CLEARANCE,
        0.0,
    )
}
