//! Configuration errors that leave an interacting actor non-functional.
use std::fmt;

use bevy::prelude::Entity;

/// A required collaborator was absent when the actor was validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionConfigError {
    MissingInventory { actor: Entity },
    MissingInput { actor: Entity },
}

impl InteractionConfigError {
    pub fn actor(&self) -> Entity {
        match self {
            Self::MissingInventory { actor } | Self::MissingInput { actor } => *actor,
        }
    }
}

impl fmt::Display for InteractionConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInventory { actor } => {
                write!(f, "Interactor {} has no InventorySlot", actor)
            }
            Self::MissingInput { actor } => {
                write!(f, "Interactor {} has no interaction input service", actor)
            }
        }
    }
}

impl std::error::Error for InteractionConfigError {}
