//! Ownership transfer between the world and an actor's hand.
//!
//! Every transfer rewrites the item's [`ItemOwner`] tag together with the slot, inside the
//! same call, so an item is never owned by two holders at once.
use bevy::prelude::*;

use crate::interaction::components::{Collider, Interactor};

use super::{
    components::{Carryable, InventorySlot, ItemOwner, PhysicsBody},
    events::HandChanged,
};

/// Query over every carryable item and the state a transfer rewrites.
pub type CarriedItems<'w, 's> = Query<
    'w,
    's,
    (
        Entity,
        &'static mut Carryable,
        &'static mut PhysicsBody,
        &'static mut Collider,
        &'static mut Transform,
    ),
    Without<Interactor>,
>;

/// Mutable view of one carried item.
pub struct CarriedItem<'a> {
    pub entity: Entity,
    pub carryable: &'a mut Carryable,
    pub body: &'a mut PhysicsBody,
    pub collider: &'a mut Collider,
    pub transform: &'a mut Transform,
}

/// Where an actor holds and drops things this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorPose {
    pub anchor: Vec3,
    pub rotation: Quat,
    pub forward: Vec3,
    pub drop_distance: f32,
}

impl ActorPose {
    pub fn new(actor: &Transform, slot: &InventorySlot, drop_distance: f32) -> Self {
        Self {
            anchor: actor.transform_point(slot.hold_anchor),
            rotation: actor.rotation,
            forward: actor.forward().as_vec3(),
            drop_distance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickupOutcome {
    Picked,
    /// The item was already in this hand; only its pose was refreshed.
    AlreadyHeld,
    /// A different item occupies the slot and must be dropped first.
    SlotBusy(Entity),
}

impl InventorySlot {
    /// Takes `item` into the hand: simulation and collision are switched off and the item is
    /// snapped onto the hold anchor.
    pub fn pickup(&mut self, actor: Entity, pose: &ActorPose, item: CarriedItem<'_>) -> PickupOutcome {
        match self.held {
            Some(held) if held == item.entity => {
                snap_to_anchor(pose, item.transform);
                return PickupOutcome::AlreadyHeld;
            }
            Some(held) => return PickupOutcome::SlotBusy(held),
            None => {}
        }

        item.body.kinematic = true;
        item.collider.enabled = false;
        item.carryable.owner = ItemOwner::Hand { actor };
        snap_to_anchor(pose, item.transform);
        self.held = Some(item.entity);
        PickupOutcome::Picked
    }

    /// Releases the held item into the world in front of the actor. Returns `false` when the
    /// slot is empty or `item` is not the held item.
    pub fn drop_held(&mut self, pose: &ActorPose, item: CarriedItem<'_>) -> bool {
        if self.held != Some(item.entity) {
            return false;
        }

        snap_to_anchor(pose, item.transform);
        item.transform.translation += pose.forward * pose.drop_distance;
        item.body.kinematic = false;
        item.collider.enabled = true;
        item.carryable.owner = ItemOwner::World;
        self.held = None;
        true
    }

    /// Empties the slot without relocating the item or re-enabling its physics or collision.
    ///
    /// The caller takes over the returned item and must re-tag its [`ItemOwner`] and restore
    /// collision in the same tick. The pressure plate does both; any other caller that skips
    /// this leaves the item permanently non-collidable.
    pub fn clear_object_in_hand(&mut self) -> Option<Entity> {
        self.held.take()
    }
}

fn snap_to_anchor(pose: &ActorPose, transform: &mut Transform) {
    transform.translation = pose.anchor;
    transform.rotation = pose.rotation;
}

/// Drops the held item, if any, and announces the empty hand.
pub fn drop_from_slot(
    actor: Entity,
    slot: &mut InventorySlot,
    pose: &ActorPose,
    items: &mut CarriedItems,
    hands: &mut MessageWriter<HandChanged>,
) -> bool {
    let Some(held) = slot.held() else {
        return false;
    };
    let Ok((entity, mut carryable, mut body, mut collider, mut transform)) = items.get_mut(held)
    else {
        warn!(
            "Held item {} of {} no longer exists; clearing the slot",
            held, actor
        );
        slot.clear_object_in_hand();
        hands.write(HandChanged {
            actor,
            occupied: false,
        });
        return true;
    };

    let dropped = slot.drop_held(
        pose,
        CarriedItem {
            entity,
            carryable: &mut carryable,
            body: &mut body,
            collider: &mut collider,
            transform: &mut transform,
        },
    );
    if dropped {
        debug!("{} dropped {}", actor, entity);
        hands.write(HandChanged {
            actor,
            occupied: false,
        });
    }
    dropped
}

/// Picks `item` up into the actor's slot, dropping a different held item first.
pub fn pickup_into_slot(
    actor: Entity,
    slot: &mut InventorySlot,
    pose: &ActorPose,
    item: Entity,
    items: &mut CarriedItems,
    hands: &mut MessageWriter<HandChanged>,
) -> bool {
    if slot.held().is_some_and(|held| held != item) {
        drop_from_slot(actor, slot, pose, items, hands);
    }

    let Ok((entity, mut carryable, mut body, mut collider, mut transform)) = items.get_mut(item)
    else {
        warn!("{} tried to pick up {}, which is not carryable", actor, item);
        return false;
    };

    let outcome = slot.pickup(
        actor,
        pose,
        CarriedItem {
            entity,
            carryable: &mut carryable,
            body: &mut body,
            collider: &mut collider,
            transform: &mut transform,
        },
    );
    match outcome {
        PickupOutcome::Picked => {
            debug!("{} picked up {}", actor, entity);
            hands.write(HandChanged {
                actor,
                occupied: true,
            });
            true
        }
        PickupOutcome::AlreadyHeld => true,
        PickupOutcome::SlotBusy(held) => {
            warn!(
                "{} could not pick up {}: slot still holds {}",
                actor, entity, held
            );
            false
        }
    }
}
