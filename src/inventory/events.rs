//! Messages for hand-state presentation.
use bevy::prelude::{Entity, Message};

/// Fired when an actor's hand becomes occupied or empty.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandChanged {
    pub actor: Entity,
    pub occupied: bool,
}
