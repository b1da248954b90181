// src/ui/hud/plugin.rs
//
// UiPlugin coordinates HUD spawning and message-driven updates.

use bevy::prelude::*;

use crate::core::TickSet;

use super::components::HudSettings;
use super::systems::{spawn_hud, update_hand_indicator, update_tooltip_panel};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        info!("UiPlugin registered");

        app.insert_resource(HudSettings::default())
            .add_systems(Startup, spawn_hud)
            .add_systems(
                Update,
                (update_tooltip_panel, update_hand_indicator).in_set(TickSet::Presentation),
            );
    }
}
