//! Deterministic per-frame ordering of the puzzle runtime.
use bevy::prelude::*;

/// Stages of one simulation frame, in execution order.
///
/// The dispatcher always runs before the inventory, and the inventory
/// before any pressure plate.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    /// Advance [`SimulationClock`](super::SimulationClock).
    Clock,
    /// Sample devices and move the player.
    Input,
    /// Cast interaction rays and route clicks.
    Dispatch,
    /// Kind handlers consume routed interactions.
    Interact,
    Inventory,
    Plates,
    Doors,
    /// HUD, telemetry, and debug output.
    Presentation,
}

/// Chains the [`TickSet`]s inside `Update`.
pub fn configure_tick_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            TickSet::Clock,
            TickSet::Input,
            TickSet::Dispatch,
            TickSet::Interact,
            TickSet::Inventory,
            TickSet::Plates,
            TickSet::Doors,
            TickSet::Presentation,
        )
            .chain(),
    );
}
