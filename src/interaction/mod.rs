//! Interaction module - looks for interactables under the actor's gaze and routes clicks to them.

pub mod components;
pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod events;
pub mod input;
pub mod plugin;
pub mod raycast;
pub mod tooltip;

pub use plugin::InteractionPlugin;
