//! Puzzle messages consumed by presentation and telemetry.
use bevy::prelude::{Entity, Message};

use super::door::DoorCommand;

/// A rock was picked up directly; any plate slot holding it has been vacated.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RockPickedUp {
    pub rock: Entity,
    pub actor: Entity,
}

/// A held rock was installed into a plate's snap slot.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RockPlaced {
    pub rock: Entity,
    pub plate: Entity,
    pub slot: usize,
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PlateWeightChanged {
    pub plate: Entity,
    pub previous: f32,
    pub current: f32,
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct DoorCommandIssued {
    pub plate: Entity,
    pub door: Entity,
    pub command: DoorCommand,
}
