use bevy::prelude::*;

mod core;
mod interaction;
mod inventory;
mod puzzle;
mod ui;
mod world;

#[cfg(test)]
mod testing;

use crate::{
    core::CorePlugin, interaction::InteractionPlugin, inventory::InventoryPlugin,
    puzzle::PuzzlePlugin, ui::UiPlugin, world::WorldPlugin,
};

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            CorePlugin::default(),
            InteractionPlugin,
            InventoryPlugin,
            PuzzlePlugin::default(),
            WorldPlugin, // After the interaction and inventory plugins so their settings exist
            UiPlugin,
        ))
        .run();
}
