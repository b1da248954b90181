//! Per-tick target acquisition, tooltip transitions, and click routing.
use bevy::prelude::*;

use crate::{inventory::components::InventorySlot, puzzle::components::Rock};

use super::{
    components::{
        Collider, Interactable, InteractableKind, Interactor, InteractorFault, LookTracker,
        TerminalMarker,
    },
    errors::InteractionConfigError,
    events::{InteractRequested, TooltipChanged},
    input::InteractionInput,
    raycast::cast_interaction_ray,
    tooltip::{tooltip_for, TargetContext, TooltipInfo},
};

/// Checks newly added interactors for their required collaborators. Actors missing one are
/// tagged with [`InteractorFault`] and ignored by the dispatcher from then on.
pub fn validate_interactors(
    mut commands: Commands,
    input: Option<Res<InteractionInput>>,
    actors: Query<(Entity, Has<InventorySlot>), (Added<Interactor>, Without<InteractorFault>)>,
) {
    for (actor, has_inventory) in actors.iter() {
        let error = if input.is_none() {
            InteractionConfigError::MissingInput { actor }
        } else if !has_inventory {
            InteractionConfigError::MissingInventory { actor }
        } else {
            debug!("Interactor {} validated", actor);
            continue;
        };

        error!("{}. The actor is disabled for interaction.", error);
        commands.entity(actor).insert(InteractorFault { error });
    }
}

/// Casts each actor's interaction ray and emits a [`TooltipChanged`] when the target changes.
#[allow(clippy::type_complexity)]
pub fn acquire_interaction_targets(
    mut actors: Query<
        (
            Entity,
            &Interactor,
            &Transform,
            &mut LookTracker,
            Option<&InventorySlot>,
        ),
        Without<InteractorFault>,
    >,
    colliders: Query<(Entity, &Transform, &Collider)>,
    interactables: Query<(&Interactable, Option<&Rock>, Has<TerminalMarker>)>,
    rocks: Query<(), With<Rock>>,
    mut tooltips: MessageWriter<TooltipChanged>,
) {
    for (actor, interactor, transform, mut tracker, inventory) in actors.iter_mut() {
        let ray = Ray3d {
            origin: transform.translation + interactor.ray_offset,
            direction: transform.forward(),
        };
        let candidates = colliders
            .iter()
            .filter(|(entity, _, _)| *entity != actor)
            .map(|(entity, collider_transform, collider)| {
                (entity, collider_transform.translation, collider)
            });

        let target = cast_interaction_ray(ray, interactor.max_range, interactor.layers, candidates)
            .map(|hit| hit.entity)
            .filter(|entity| interactables.contains(*entity));

        if !tracker.observe(target) {
            continue;
        }

        let info = match target.and_then(|entity| interactables.get(entity).ok()) {
            Some((interactable, rock, terminal)) => {
                let context = TargetContext {
                    destroy_on_pickup: rock.is_some_and(|rock| rock.destroy_on_pickup),
                    terminal,
                    hand_holds_rock: inventory
                        .and_then(|slot| slot.held())
                        .is_some_and(|held| rocks.contains(held)),
                };
                tooltip_for(Some(&interactable.kind), &context)
            }
            None => TooltipInfo::inactive(),
        };

        debug!(
            "Interactor {} now targets {:?} (tooltip active: {})",
            actor, target, info.active
        );
        tooltips.write(TooltipChanged { actor, info });
    }
}

/// Routes this tick's activation edge to each actor's current target, at most once per actor.
pub fn route_interactions(
    input: Option<Res<InteractionInput>>,
    actors: Query<(Entity, &LookTracker), Without<InteractorFault>>,
    interactables: Query<&Interactable>,
    mut requests: MessageWriter<InteractRequested>,
) {
    let Some(click) = input.and_then(|input| input.activated_click()) else {
        return;
    };

    for (actor, tracker) in actors.iter() {
        let Some(target) = tracker.target() else {
            continue;
        };
        let Ok(interactable) = interactables.get(target) else {
            continue;
        };

        requests.write(InteractRequested {
            actor,
            target,
            kind: interactable.kind.clone(),
            click,
        });
    }
}

/// Interactions with kinds that have no behaviour in this runtime.
pub fn log_unhandled_interactions(mut requests: MessageReader<InteractRequested>) {
    for request in requests.read() {
        match &request.kind {
            InteractableKind::LightPillar | InteractableKind::PictureTile => {
                debug!(
                    "{} interaction on {} from {} has no behaviour",
                    request.kind, request.target, request.actor
                );
            }
            InteractableKind::Unrecognized(tag) => {
                warn!(
                    "Ignoring interaction with unrecognized interactable type {}",
                    tag
                );
            }
            InteractableKind::Rock | InteractableKind::PressurePlate => {}
        }
    }
}
