//! Edge-detected interaction input, fed from the mouse when a device backend is present.
use bevy::prelude::*;

/// Which button triggered an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseClick {
    Primary,
    Secondary,
}

/// Per-tick activation edges. Both flags are true only on the tick the button went down.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InteractionInput {
    pub primary_activated: bool,
    pub secondary_activated: bool,
}

impl InteractionInput {
    /// The click routed to a target this tick. Primary wins when both edges fire together.
    pub fn activated_click(&self) -> Option<MouseClick> {
        if self.primary_activated {
            Some(MouseClick::Primary)
        } else if self.secondary_activated {
            Some(MouseClick::Secondary)
        } else {
            None
        }
    }
}

/// Copies mouse button edges into [`InteractionInput`]. Without a mouse backend the resource is left as-is.
pub fn read_interaction_input(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    input: Option<ResMut<InteractionInput>>,
) {
    let (Some(buttons), Some(mut input)) = (buttons, input) else {
        return;
    };

    input.primary_activated = buttons.just_pressed(MouseButton::Left);
    input.secondary_activated = buttons.just_pressed(MouseButton::Right);
}
