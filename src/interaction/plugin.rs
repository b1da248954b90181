//! Interaction plugin wiring target acquisition and click routing.
use bevy::prelude::*;

use crate::core::TickSet;

use super::{
    config::InteractionSettings,
    dispatcher::{
        acquire_interaction_targets, log_unhandled_interactions, route_interactions,
        validate_interactors,
    },
    events::{InteractRequested, TooltipChanged},
    input::{read_interaction_input, InteractionInput},
};

/// Registers the interaction dispatcher.
///
/// # System Ordering
///
/// 1. `read_interaction_input`, `validate_interactors` - `TickSet::Input`
/// 2. `acquire_interaction_targets` then `route_interactions` - `TickSet::Dispatch`
/// 3. `log_unhandled_interactions` - `TickSet::Interact`, alongside the kind handlers
pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<InteractionSettings>() {
            let settings = InteractionSettings::load_or_default();
            info!(
                "Interaction ray configured: range {:.2}, layers {:?}",
                settings.max_range, settings.layers
            );
            app.insert_resource(settings);
        }

        app.init_resource::<InteractionInput>()
            .add_message::<TooltipChanged>()
            .add_message::<InteractRequested>()
            .add_systems(
                Update,
                (
                    (read_interaction_input, validate_interactors).in_set(TickSet::Input),
                    (acquire_interaction_targets, route_interactions)
                        .chain()
                        .in_set(TickSet::Dispatch),
                    log_unhandled_interactions.in_set(TickSet::Interact),
                ),
            );
    }
}
