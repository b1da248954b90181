//! Rock components and the pickup notification channel plates subscribe to.
use std::fmt;

use bevy::prelude::*;

use crate::{
    interaction::components::{Interactable, InteractableKind},
    inventory::components::Carryable,
};

/// A weighted pickup whose static index links it to a matching snap slot.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
#[require(Carryable, PickupChannel, Interactable = Interactable::new(InteractableKind::Rock))]
pub struct Rock {
    /// Mass in kilograms; also the weight the rock adds to a plate.
    pub weight: f32,
    pub slot_index: usize,
    pub destroy_on_pickup: bool,
}

impl Rock {
    pub fn new(weight: f32, slot_index: usize) -> Self {
        Self {
            weight: weight.max(0.0),
            slot_index,
            destroy_on_pickup: false,
        }
    }

    pub fn destroyed_on_pickup(mut self) -> Self {
        self.destroy_on_pickup = true;
        self
    }
}

/// Handle identifying one plate slot's subscription to a rock's pickup notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SUB-{:04}", self.0)
    }
}

/// Resource that issues monotonically increasing subscription ids.
#[derive(Resource, Default)]
pub struct SubscriptionIdGenerator {
    next: u64,
}

impl SubscriptionIdGenerator {
    pub fn next_id(&mut self) -> SubscriptionId {
        let id = self.next;
        self.next += 1;
        SubscriptionId::new(id)
    }
}

/// A plate slot listening for a rock being picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickupSubscription {
    pub id: SubscriptionId,
    pub plate: Entity,
    pub slot: usize,
}

/// Pickup notification channel of a rock.
#[derive(Component, Debug, Default, Clone)]
pub struct PickupChannel {
    subscribers: Vec<PickupSubscription>,
}

impl PickupChannel {
    pub fn subscribe(&mut self, subscription: PickupSubscription) {
        self.subscribers.push(subscription);
    }

    /// Removes a single subscription; returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscription| subscription.id != id);
        self.subscribers.len() != before
    }

    /// Raises the notification. Every subscription is delivered once and released.
    pub fn raise(&mut self) -> Vec<PickupSubscription> {
        std::mem::take(&mut self.subscribers)
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

/// Secondary material swapped onto rocks when they are initialised.
#[derive(Resource, Debug, Clone)]
pub struct InteractableMaterial(pub Handle<StandardMaterial>);
