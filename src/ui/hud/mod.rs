// src/ui/hud/mod.rs
//
// HUD module showing what the player is looking at and whether their hand is full.

pub mod components;
pub mod plugin;
pub mod systems;

// Re-export main types
pub use plugin::UiPlugin;
