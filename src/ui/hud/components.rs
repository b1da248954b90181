// src/ui/hud/components.rs
//
// Components and resources for the interaction HUD.

use bevy::prelude::*;

use crate::interaction::tooltip::TooltipInfo;

/// Root node of the tooltip shown under the crosshair.
#[derive(Component, Debug, Default)]
pub struct TooltipPanel;

/// Text entity inside the [`TooltipPanel`].
#[derive(Component, Debug, Default)]
pub struct TooltipLabel;

/// Text entity in the bottom-left corner reporting the hand state.
#[derive(Component, Debug, Default)]
pub struct HandIndicator;

#[derive(Component, Debug, Default)]
pub struct Crosshair;

/// Resource containing layout settings for the HUD.
#[derive(Resource, Debug)]
pub struct HudSettings {
    /// Distance of the tooltip below the screen centre (pixels).
    pub tooltip_offset: f32,

    /// Padding inside the tooltip panel (pixels).
    pub padding: f32,

    /// Offset of the hand indicator from the bottom-left corner (pixels).
    pub corner_offset: f32,

    pub crosshair_size: f32,
    pub tooltip_font_size: f32,
    pub hand_font_size: f32,
}

impl Default for HudSettings {
    fn default() -> Self {
        Self {
            tooltip_offset: 28.0,
            padding: 6.0,
            corner_offset: 20.0,
            crosshair_size: 6.0,
            tooltip_font_size: 18.0,
            hand_font_size: 16.0,
        }
    }
}

/// Text shown for a tooltip, or `None` when the tooltip is hidden.
pub fn tooltip_caption(info: &TooltipInfo) -> Option<String> {
    info.active
        .then(|| format!("{}  [{}]", info.text, info.click.label()))
}

pub fn hand_caption(occupied: bool) -> &'static str {
    if occupied {
        "Hand: carrying"
    } else {
        "Hand: empty"
    }
}
