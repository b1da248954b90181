//! Inventory plugin wiring the carried-object slot.
use bevy::prelude::*;

use crate::core::TickSet;

use super::{
    config::InventorySettings,
    events::HandChanged,
    systems::{drop_held_on_secondary, sync_held_items},
};

pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<InventorySettings>() {
            let settings = InventorySettings::load_or_default();
            info!(
                "Inventory configured: drop distance {:.2}",
                settings.drop_distance
            );
            app.insert_resource(settings);
        }

        app.add_message::<HandChanged>().add_systems(
            Update,
            (drop_held_on_secondary, sync_held_items)
                .chain()
                .in_set(TickSet::Inventory),
        );
    }
}
