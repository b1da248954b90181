//! Puzzle plugin wiring rocks, plates, doors, and puzzle telemetry.
use bevy::prelude::*;

use crate::core::TickSet;

use super::{
    components::SubscriptionIdGenerator,
    door::apply_door_pose,
    events::{DoorCommandIssued, PlateWeightChanged, RockPickedUp, RockPlaced},
    systems::{
        advance_plate_motion, handle_plate_interactions, handle_rock_interactions, init_rocks,
        sync_snapped_rocks, update_plate_weights,
    },
    telemetry::{
        flush_puzzle_telemetry_log, record_puzzle_telemetry, PuzzleTelemetry, PuzzleTelemetryLog,
    },
};

pub struct PuzzlePlugin {
    history_log: bool,
}

impl PuzzlePlugin {
    /// Keeps telemetry in memory only; nothing is written under `logs/`.
    pub fn without_history_log() -> Self {
        Self { history_log: false }
    }
}

impl Default for PuzzlePlugin {
    fn default() -> Self {
        Self { history_log: true }
    }
}

impl Plugin for PuzzlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SubscriptionIdGenerator>()
            .init_resource::<PuzzleTelemetry>()
            .add_message::<RockPickedUp>()
            .add_message::<RockPlaced>()
            .add_message::<PlateWeightChanged>()
            .add_message::<DoorCommandIssued>()
            .add_systems(Update, init_rocks.in_set(TickSet::Input))
            .add_systems(
                Update,
                (handle_rock_interactions, handle_plate_interactions)
                    .chain()
                    .in_set(TickSet::Interact),
            )
            .add_systems(
                Update,
                (update_plate_weights, advance_plate_motion, sync_snapped_rocks)
                    .chain()
                    .in_set(TickSet::Plates),
            )
            .add_systems(Update, apply_door_pose.in_set(TickSet::Doors))
            .add_systems(
                Update,
                (
                    record_puzzle_telemetry,
                    flush_puzzle_telemetry_log.run_if(resource_exists::<PuzzleTelemetryLog>),
                )
                    .chain()
                    .in_set(TickSet::Presentation),
            );

        if self.history_log {
            app.init_resource::<PuzzleTelemetryLog>();
        }
    }
}
