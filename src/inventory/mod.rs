//! Inventory module - the actor's single carried-object slot and ownership transfer.

pub mod components;
pub mod config;
pub mod events;
pub mod plugin;
pub mod systems;
pub mod transfer;

pub use plugin::InventoryPlugin;
