// src/ui/hud/systems.rs
//
// Systems for spawning the HUD and applying tooltip and hand-state messages to it.

use bevy::{ecs::message::MessageReader, prelude::*};

use crate::interaction::events::TooltipChanged;
use crate::inventory::events::HandChanged;
use crate::world::components::FirstPersonCamera;

use super::components::{
    hand_caption, tooltip_caption, Crosshair, HandIndicator, HudSettings, TooltipLabel,
    TooltipPanel,
};

// Visual constants
const BACKGROUND_COLOR: Color = Color::srgba(0.1, 0.1, 0.1, 0.75);
const TEXT_COLOR: Color = Color::WHITE;
const CROSSHAIR_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.8);

/// Spawns the crosshair, the hidden tooltip panel, and the hand indicator.
pub fn spawn_hud(mut commands: Commands, settings: Res<HudSettings>) {
    let half_crosshair = settings.crosshair_size * 0.5;
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            width: Val::Px(settings.crosshair_size),
            height: Val::Px(settings.crosshair_size),
            margin: UiRect {
                left: Val::Px(-half_crosshair),
                top: Val::Px(-half_crosshair),
                ..default()
            },
            ..default()
        },
        BackgroundColor(CROSSHAIR_COLOR),
        Crosshair,
    ));

    // Full-width row so the panel can be centred without knowing its width
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(50.0),
            width: Val::Percent(100.0),
            margin: UiRect::top(Val::Px(settings.tooltip_offset)),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|row| {
            row.spawn((
                Node {
                    padding: UiRect::all(Val::Px(settings.padding)),
                    ..default()
                },
                BackgroundColor(BACKGROUND_COLOR),
                Visibility::Hidden,
                TooltipPanel,
            ))
            .with_children(|panel| {
                panel.spawn((
                    Text::new(""),
                    TextFont {
                        font_size: settings.tooltip_font_size,
                        ..default()
                    },
                    TextColor(TEXT_COLOR),
                    TooltipLabel,
                ));
            });
        });

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(settings.corner_offset),
            left: Val::Px(settings.corner_offset),
            ..default()
        },
        Text::new(hand_caption(false)),
        TextFont {
            font_size: settings.hand_font_size,
            ..default()
        },
        TextColor(TEXT_COLOR),
        HandIndicator,
    ));
}

/// Applies the player's latest tooltip transition.
pub fn update_tooltip_panel(
    mut events: MessageReader<TooltipChanged>,
    players: Query<(), With<FirstPersonCamera>>,
    mut panels: Query<&mut Visibility, With<TooltipPanel>>,
    mut labels: Query<&mut Text, With<TooltipLabel>>,
) {
    let Some(latest) = events
        .read()
        .filter(|event| players.contains(event.actor))
        .last()
    else {
        return;
    };

    let caption = tooltip_caption(&latest.info);
    for mut visibility in panels.iter_mut() {
        *visibility = if caption.is_some() {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    if let Some(caption) = caption {
        for mut text in labels.iter_mut() {
            text.0 = caption.clone();
        }
    }
}

pub fn update_hand_indicator(
    mut events: MessageReader<HandChanged>,
    players: Query<(), With<FirstPersonCamera>>,
    mut indicators: Query<&mut Text, With<HandIndicator>>,
) {
    let Some(latest) = events
        .read()
        .filter(|event| players.contains(event.actor))
        .last()
    else {
        return;
    };

    for mut text in indicators.iter_mut() {
        text.0 = hand_caption(latest.occupied).to_string();
    }
}
