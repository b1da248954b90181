// src/ui/mod.rs
//
// UI module providing screen-space HUD elements for the first-person player.
//
// Current features:
// - Crosshair
// - Interaction tooltip (text + mouse-button hint)
// - Hand indicator (empty / carrying)

pub mod hud;

// Re-export the main plugin
pub use hud::UiPlugin;
