pub mod config;
pub mod constants;
pub mod controller;
pub mod facing;
pub mod gizmo;
pub mod ground;
pub mod host;
pub mod layers;
pub mod motion;
pub mod rapier_world;
pub mod types;

pub use config::{AxisLock, ControllerConfig};
pub use controller::{RailController, StepReport};
pub use ground::GroundCheck;
pub use host::{CharacterMover, FreeSpaceMover, GroundProbe};
pub use layers::{BitmaskFlags, FlagBitmask, LayerMask};
pub use rapier_world::{
    ColliderShapeDef, LevelGeometry, RapierGroundProbe, RapierMover, StaticColliderDef,
};
pub use types::{CapsuleSpec, InputSnapshot, Pose, Quat, Vec3};
