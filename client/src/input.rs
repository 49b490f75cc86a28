use bevy::prelude::*;
use controller::InputSnapshot;
use leafwing_input_manager::prelude::*;

#[derive(Reflect, Actionlike, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RailAction {
    #[actionlike(Axis)]
    Horizontal,
    #[actionlike(Axis)]
    Vertical,
    Jump,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<RailAction>::default());

    app.register_type::<RailAction>();

    let mut input_map = InputMap::<RailAction>::default();
    input_map.insert_axis(RailAction::Horizontal, VirtualAxis::ad());
    input_map.insert_axis(RailAction::Horizontal, VirtualAxis::horizontal_arrow_keys());
    input_map.insert_axis(RailAction::Vertical, VirtualAxis::ws());
    input_map.insert_axis(RailAction::Vertical, VirtualAxis::vertical_arrow_keys());
    input_map.insert(RailAction::Jump, KeyCode::Space);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<RailAction>::default());
}

/// Raw axes plus a jump edge for this frame.
pub fn snapshot(actions: &ActionState<RailAction>) -> InputSnapshot {
    InputSnapshot::new(
        actions.clamped_value(&RailAction::Horizontal),
        actions.clamped_value(&RailAction::Vertical),
        actions.just_pressed(&RailAction::Jump),
    )
}
