//! World module housing the environment, the first-person player, and the puzzle level.
pub mod components;
pub mod level;
pub mod plugin;
pub mod systems;

pub use plugin::WorldPlugin;
