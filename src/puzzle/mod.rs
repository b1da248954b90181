//! Puzzle module - rocks, pressure plates, and the doors they drive.

pub mod components;
pub mod config;
pub mod door;
pub mod errors;
pub mod events;
pub mod plate;
pub mod plugin;
pub mod systems;
pub mod telemetry;

pub use plugin::PuzzlePlugin;
