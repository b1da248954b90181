//! Core timing and frame-ordering utilities shared by every gameplay plugin.
pub mod clock;
pub mod plugin;
pub mod schedule;

pub use clock::SimulationClock;
pub use plugin::CorePlugin;
pub use schedule::TickSet;
