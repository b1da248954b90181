//! Messages emitted by the interaction dispatcher.
use bevy::prelude::{Entity, Message};

use super::{components::InteractableKind, input::MouseClick, tooltip::TooltipInfo};

/// Fired when an actor's looked-at target changes. Never repeated while the target is unchanged.
#[derive(Message, Debug, Clone)]
pub struct TooltipChanged {
    pub actor: Entity,
    pub info: TooltipInfo,
}

/// One routed `Interact(actor, click)` call; kind handlers consume the kinds they own.
#[derive(Message, Debug, Clone)]
pub struct InteractRequested {
    pub actor: Entity,
    pub target: Entity,
    pub kind: InteractableKind,
    pub click: MouseClick,
}
