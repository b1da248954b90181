//! Components for carried objects and the slot that holds them.
use bevy::prelude::*;

/// Who currently owns a carryable object. Exactly one owner at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemOwner {
    #[default]
    World,
    Hand { actor: Entity },
    PlateSlot { plate: Entity, slot: usize },
}

/// An object that can move between the world, an actor's hand, and a plate slot.
#[derive(Component, Debug, Default, Clone, Copy)]
#[require(PhysicsBody)]
pub struct Carryable {
    pub owner: ItemOwner,
}

/// Simulation flags of a carryable body. There is no physics engine; the flags are the contract
/// consumed by whatever drives the bodies.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct PhysicsBody {
    pub mass: f32,
    /// Kinematic bodies ignore simulation and follow their owner.
    pub kinematic: bool,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            mass: 1.0,
            kinematic: false,
        }
    }
}

/// Single-capacity carried-object state owned by an actor.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct InventorySlot {
    pub(super) held: Option<Entity>,
    /// Hold anchor, local to the actor.
    pub hold_anchor: Vec3,
}

impl InventorySlot {
    pub fn new(hold_anchor: Vec3) -> Self {
        Self {
            held: None,
            hold_anchor,
        }
    }

    pub fn held(&self) -> Option<Entity> {
        self.held
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }
}
