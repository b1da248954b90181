//! WorldPlugin coordinates environment setup, the puzzle level, and first-person controls.
use bevy::prelude::*;

use crate::{core::TickSet, puzzle::config::PuzzleConfig};

use super::{
    level::spawn_puzzle_level,
    systems::{
        first_person_mouse_look, first_person_translate, spawn_world_environment,
        update_cursor_grab,
    },
};

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<PuzzleConfig>() {
            let config = PuzzleConfig::load_or_default();
            info!(
                "Puzzle layout loaded: {} plate(s), {} rock(s), {} prop(s)",
                config.plates.len(),
                config.rocks.len(),
                config.props.len()
            );
            app.insert_resource(config);
        }

        app.add_systems(Startup, (spawn_world_environment, spawn_puzzle_level))
            .add_systems(
                Update,
                (
                    update_cursor_grab,
                    first_person_mouse_look,
                    first_person_translate,
                )
                    .chain()
                    .in_set(TickSet::Input),
            );
    }
}
