//! Systems for rocks, pressure plates, and the doors the plates command.
use bevy::{ecs::entity_disabling::Disabled, prelude::*};

use crate::{
    core::SimulationClock,
    interaction::{
        components::{Collider, InteractableKind, Interactor, InteractorFault},
        events::InteractRequested,
        input::MouseClick,
    },
    inventory::{
        components::{Carryable, InventorySlot, ItemOwner, PhysicsBody},
        config::InventorySettings,
        events::HandChanged,
        transfer::{pickup_into_slot, ActorPose, CarriedItems},
    },
};

use super::{
    components::{
        InteractableMaterial, PickupChannel, PickupSubscription, Rock, SubscriptionIdGenerator,
    },
    door::Door,
    events::{DoorCommandIssued, PlateWeightChanged, RockPickedUp, RockPlaced},
    plate::{door_command_for, PressurePlate, SnapSlot},
};

/// Seeds each new rock's mass from its weight and swaps in the interactable material.
pub fn init_rocks(
    material: Option<Res<InteractableMaterial>>,
    mut rocks: Query<
        (
            &Rock,
            &mut PhysicsBody,
            Option<&mut MeshMaterial3d<StandardMaterial>>,
        ),
        Added<Rock>,
    >,
) {
    for (rock, mut body, mesh_material) in rocks.iter_mut() {
        body.mass = rock.weight;
        if let (Some(material), Some(mut mesh_material)) = (material.as_ref(), mesh_material) {
            mesh_material.0 = material.0.clone();
        }
    }
}

/// Primary clicks on rocks: deactivate destroy-on-pickup rocks, otherwise raise the pickup
/// notification and move the rock into the actor's hand.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn handle_rock_interactions(
    mut commands: Commands,
    mut requests: MessageReader<InteractRequested>,
    settings: Res<InventorySettings>,
    mut actors: Query<
        (&Transform, &mut InventorySlot),
        (With<Interactor>, Without<InteractorFault>),
    >,
    mut items: CarriedItems,
    mut rocks: Query<(&Rock, &mut PickupChannel)>,
    mut plates: Query<&mut PressurePlate>,
    mut hands: MessageWriter<HandChanged>,
    mut pickups: MessageWriter<RockPickedUp>,
) {
    for request in requests.read() {
        if request.kind != InteractableKind::Rock || request.click != MouseClick::Primary {
            continue;
        }
        let target = request.target;
        let Ok((rock, mut channel)) = rocks.get_mut(target) else {
            warn!("{} is tagged as a rock but has no Rock component", target);
            continue;
        };

        if rock.destroy_on_pickup {
            vacate_plate_slots(target, channel.raise(), &mut plates);
            if let Ok((_, mut carryable, _, _, _)) = items.get_mut(target) {
                carryable.owner = ItemOwner::World;
            }
            commands.entity(target).insert(Disabled);
            info!("Rock {} deactivated on pickup", target);
            continue;
        }

        let Ok((transform, mut slot)) = actors.get_mut(request.actor) else {
            debug!("{} cannot carry rock {}", request.actor, target);
            continue;
        };

        vacate_plate_slots(target, channel.raise(), &mut plates);
        pickups.write(RockPickedUp {
            rock: target,
            actor: request.actor,
        });

        let pose = ActorPose::new(transform, &slot, settings.drop_distance);
        pickup_into_slot(
            request.actor,
            &mut slot,
            &pose,
            target,
            &mut items,
            &mut hands,
        );
    }
}

fn vacate_plate_slots(
    rock: Entity,
    released: Vec<PickupSubscription>,
    plates: &mut Query<&mut PressurePlate>,
) {
    for subscription in released {
        let Ok(mut plate) = plates.get_mut(subscription.plate) else {
            debug!(
                "Plate {} subscribed to rock {} no longer exists",
                subscription.plate, rock
            );
            continue;
        };
        if plate
            .release(subscription.slot, subscription.id)
            .is_some()
        {
            debug!(
                "Rock {} left slot {} of plate {}",
                rock, subscription.slot, subscription.plate
            );
        }
    }
}

/// Primary clicks on plates: move the rock in the actor's hand into its indexed snap slot.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn handle_plate_interactions(
    mut requests: MessageReader<InteractRequested>,
    mut ids: ResMut<SubscriptionIdGenerator>,
    mut actors: Query<&mut InventorySlot, (With<Interactor>, Without<InteractorFault>)>,
    mut rocks: Query<(&Rock, &mut Carryable, &mut Collider, &mut PickupChannel)>,
    mut plates: Query<&mut PressurePlate>,
    mut hands: MessageWriter<HandChanged>,
    mut placements: MessageWriter<RockPlaced>,
) {
    for request in requests.read() {
        if request.kind != InteractableKind::PressurePlate || request.click != MouseClick::Primary
        {
            continue;
        }
        let (actor, plate_entity) = (request.actor, request.target);

        let Ok(mut slot) = actors.get_mut(actor) else {
            continue;
        };
        let Some(held) = slot.held() else {
            debug!("{} has nothing to place on plate {}", actor, plate_entity);
            continue;
        };
        let Ok((rock, mut carryable, mut collider, mut channel)) = rocks.get_mut(held) else {
            debug!("{} is holding {}, which is not a rock", actor, held);
            continue;
        };
        let Ok(mut plate) = plates.get_mut(plate_entity) else {
            warn!("{} is tagged as a pressure plate but has none", plate_entity);
            continue;
        };

        let subscription = PickupSubscription {
            id: ids.next_id(),
            plate: plate_entity,
            slot: rock.slot_index,
        };
        let snapped = SnapSlot {
            rock: held,
            weight: rock.weight,
            subscription: subscription.id,
        };
        if let Err(err) = plate.place(rock.slot_index, snapped) {
            warn!(
                "Cannot place rock {} on plate {}: {}",
                held, plate_entity, err
            );
            continue;
        }

        slot.clear_object_in_hand();
        hands.write(HandChanged {
            actor,
            occupied: false,
        });
        // The slot was cleared without restoring collision; that is this handler's job.
        collider.enabled = true;
        carryable.owner = ItemOwner::PlateSlot {
            plate: plate_entity,
            slot: rock.slot_index,
        };
        channel.subscribe(subscription);

        info!(
            "Rock {} ({:.1} kg) placed in slot {} of plate {}",
            held, rock.weight, rock.slot_index, plate_entity
        );
        placements.write(RockPlaced {
            rock: held,
            plate: plate_entity,
            slot: rock.slot_index,
        });
    }
}

/// Recomputes each plate's aggregate weight and, on an edge, commands its door.
pub fn update_plate_weights(
    mut plates: Query<(Entity, &mut PressurePlate)>,
    mut doors: Query<&mut Door>,
    mut weights: MessageWriter<PlateWeightChanged>,
    mut door_commands: MessageWriter<DoorCommandIssued>,
) {
    for (entity, mut plate) in plates.iter_mut() {
        let Some(change) = plate.observe_weight() else {
            continue;
        };
        weights.write(PlateWeightChanged {
            plate: entity,
            previous: change.previous,
            current: change.current,
        });

        let door_entity = plate.door();
        let Ok(mut door) = doors.get_mut(door_entity) else {
            error!(
                "Plate {} references {}, which is not a door",
                entity, door_entity
            );
            continue;
        };
        let Some(command) = door_command_for(change, plate.settings(), door.state()) else {
            continue;
        };

        info!(
            "Plate {} weight {:.2} -> {:.2}: door {}",
            entity, change.previous, change.current, command
        );
        door.apply(command);
        door_commands.write(DoorCommandIssued {
            plate: entity,
            door: door_entity,
            command,
        });
    }
}

/// Moves each plate toward its target height.
pub fn advance_plate_motion(
    clock: Res<SimulationClock>,
    mut plates: Query<(&mut PressurePlate, &mut Transform)>,
) {
    let delta_seconds = clock.last_scaled_delta().as_secs_f32();
    for (mut plate, mut transform) in plates.iter_mut() {
        if let Some(height) = plate.advance_motion(delta_seconds) {
            transform.translation.y = height;
        }
    }
}

/// Keeps snapped rocks on their snap point with zero local offset and rotation.
pub fn sync_snapped_rocks(
    plates: Query<(&PressurePlate, &Transform), Without<Carryable>>,
    mut rocks: Query<(&Carryable, &mut Transform)>,
) {
    for (carryable, mut transform) in rocks.iter_mut() {
        let ItemOwner::PlateSlot { plate, slot } = carryable.owner else {
            continue;
        };
        let Ok((plate, plate_transform)) = plates.get(plate) else {
            continue;
        };
        let Some(snap_point) = plate.snap_point(slot) else {
            continue;
        };

        transform.translation = plate_transform.transform_point(snap_point);
        transform.rotation = plate_transform.rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        interaction::{components::CollisionLayers, events::TooltipChanged},
        puzzle::door::{DoorCommand, DoorState},
        testing::{self, Recorded},
    };

    const ACTOR_POSITION: Vec3 = Vec3::new(0.0, 0.0, -1.0);
    const LOOSE_POSITIONS: [Vec3; 3] = [
        Vec3::new(1.5, 0.0, -1.0),
        Vec3::new(-1.5, 0.0, -1.0),
        Vec3::new(0.0, 0.0, 0.5),
    ];

    struct Puzzle {
        app: App,
        actor: Entity,
        plate: Entity,
        door: Entity,
        rocks: Vec<Entity>,
    }

    impl Puzzle {
        fn new(min_weight: f32, max_weight: f32, weights: &[f32]) -> Self {
            let mut app = testing::puzzle_app();
            let actor = testing::spawn_actor(&mut app, ACTOR_POSITION);
            let (plate, door) = testing::spawn_plate(&mut app, min_weight, max_weight, 3);
            let rocks = weights
                .iter()
                .zip(LOOSE_POSITIONS)
                .enumerate()
                .map(|(slot, (weight, position))| {
                    testing::spawn_rock(&mut app, *weight, slot, position)
                })
                .collect();
            Self {
                app,
                actor,
                plate,
                door,
                rocks,
            }
        }

        fn click(&mut self, target: Entity) {
            testing::look_at(&mut self.app, self.actor, target);
            testing::press(&mut self.app, MouseClick::Primary);
        }

        fn carry_to_plate(&mut self, rock: Entity) {
            self.click(rock);
            self.click(self.plate);
        }

        /// Takes `rock` off the plate and drops it behind the actor.
        fn take_off_and_drop(&mut self, rock: Entity) {
            self.click(rock);
            self.app
                .world_mut()
                .entity_mut(self.actor)
                .insert(Transform::from_translation(ACTOR_POSITION).looking_to(Vec3::Z, Vec3::Y));
            testing::press(&mut self.app, MouseClick::Secondary);
        }

        fn plate(&self) -> &PressurePlate {
            self.app
                .world()
                .get::<PressurePlate>(self.plate)
                .expect("plate")
        }

        fn held(&self) -> Option<Entity> {
            self.app
                .world()
                .get::<InventorySlot>(self.actor)
                .expect("slot")
                .held()
        }

        fn owner(&self, rock: Entity) -> ItemOwner {
            self.app
                .world()
                .get::<Carryable>(rock)
                .expect("carryable")
                .owner
        }

        fn door_commands(&self) -> Vec<DoorCommand> {
            self.app
                .world()
                .resource::<Recorded<DoorCommandIssued>>()
                .0
                .iter()
                .map(|issued| issued.command)
                .collect()
        }
    }

    #[test]
    fn three_rocks_of_ten_open_the_door() {
        let mut puzzle = Puzzle::new(25.0, 30.0, &[10.0, 10.0, 10.0]);
        for rock in puzzle.rocks.clone() {
            puzzle.carry_to_plate(rock);
        }

        assert_eq!(
            puzzle.door_commands(),
            vec![
                DoorCommand::Nudge { weight: 10.0 },
                DoorCommand::Nudge { weight: 20.0 },
                DoorCommand::Open,
            ]
        );
        assert_eq!(puzzle.plate().current_weight(), 30.0);
        assert_eq!(puzzle.held(), None);

        let door = puzzle.app.world().get::<Door>(puzzle.door).expect("door");
        assert_eq!(door.state(), DoorState::Open);
        let door_height = puzzle
            .app
            .world()
            .get::<Transform>(puzzle.door)
            .expect("door transform")
            .translation
            .y;
        assert_eq!(door_height, 2.0);
    }

    #[test]
    fn removing_one_rock_nudges_instead_of_closing() {
        let mut puzzle = Puzzle::new(25.0, 30.0, &[10.0, 10.0, 10.0]);
        for rock in puzzle.rocks.clone() {
            puzzle.carry_to_plate(rock);
        }

        let taken = puzzle.rocks[1];
        puzzle.click(taken);

        assert_eq!(
            puzzle.door_commands().last(),
            Some(&DoorCommand::Nudge { weight: 20.0 })
        );
        assert!(puzzle.plate().slot(1).is_none());
        assert_eq!(puzzle.plate().current_weight(), 20.0);
        assert_eq!(puzzle.held(), Some(taken));
        assert_eq!(
            puzzle.owner(taken),
            ItemOwner::Hand {
                actor: puzzle.actor
            }
        );
    }

    #[test]
    fn emptying_the_plate_closes_the_door_exactly_once() {
        let mut puzzle = Puzzle::new(25.0, 30.0, &[10.0, 10.0, 10.0]);
        for rock in puzzle.rocks.clone() {
            puzzle.carry_to_plate(rock);
        }
        for rock in puzzle.rocks.clone() {
            puzzle.take_off_and_drop(rock);
        }
        for _ in 0..10 {
            testing::step(&mut puzzle.app);
        }

        let commands = puzzle.door_commands();
        assert_eq!(
            commands[3..],
            [
                DoorCommand::Nudge { weight: 20.0 },
                DoorCommand::Nudge { weight: 10.0 },
                DoorCommand::Close,
            ]
        );
        assert_eq!(
            commands
                .iter()
                .filter(|command| **command == DoorCommand::Close)
                .count(),
            1
        );
        assert_eq!(puzzle.plate().current_weight(), 0.0);
        for rock in &puzzle.rocks {
            assert_eq!(puzzle.owner(*rock), ItemOwner::World);
        }
    }

    #[test]
    fn weight_at_the_upper_bound_opens_the_door() {
        let mut puzzle = Puzzle::new(20.0, 30.0, &[15.0, 15.0]);
        for rock in puzzle.rocks.clone() {
            puzzle.carry_to_plate(rock);
        }

        assert_eq!(
            puzzle.door_commands(),
            vec![DoorCommand::Nudge { weight: 15.0 }, DoorCommand::Open]
        );
    }

    #[test]
    fn destroy_on_pickup_rock_is_disabled_without_touching_the_hand() {
        let mut app = testing::puzzle_app();
        let actor = testing::spawn_actor(&mut app, ACTOR_POSITION);
        let rock = app
            .world_mut()
            .spawn((
                Rock::new(5.0, 0).destroyed_on_pickup(),
                Collider::sphere(0.2, CollisionLayers::INTERACTABLE),
                Transform::from_translation(LOOSE_POSITIONS[0]),
            ))
            .id();

        testing::look_at(&mut app, actor, rock);
        testing::press(&mut app, MouseClick::Primary);
        testing::step(&mut app);

        assert!(app.world().entity(rock).contains::<Disabled>());
        assert!(app
            .world()
            .get::<InventorySlot>(actor)
            .expect("slot")
            .is_empty());
        assert!(app.world().resource::<Recorded<HandChanged>>().0.is_empty());

        let tooltips = &app.world().resource::<Recorded<TooltipChanged>>().0;
        assert_eq!(tooltips.first().map(|event| event.info.text.as_str()), Some("Destroy rock"));
        assert!(tooltips.last().is_some_and(|event| !event.info.active));
    }

    #[test]
    fn occupied_slot_keeps_the_rock_in_hand() {
        let mut puzzle = Puzzle::new(25.0, 30.0, &[10.0]);
        let intruder = testing::spawn_rock(&mut puzzle.app, 10.0, 0, LOOSE_POSITIONS[1]);
        let first = puzzle.rocks[0];
        puzzle.carry_to_plate(first);
        puzzle.carry_to_plate(intruder);

        assert_eq!(puzzle.plate().slot(0).map(|slot| slot.rock), Some(first));
        assert_eq!(puzzle.plate().current_weight(), 10.0);
        assert_eq!(puzzle.held(), Some(intruder));
        assert_eq!(
            puzzle.owner(intruder),
            ItemOwner::Hand {
                actor: puzzle.actor
            }
        );
        assert_eq!(puzzle.door_commands().len(), 1);
    }

    #[test]
    fn every_rock_has_exactly_one_owner() {
        let mut puzzle = Puzzle::new(25.0, 30.0, &[10.0, 12.0, 8.0]);
        let rocks = puzzle.rocks.clone();
        puzzle.carry_to_plate(rocks[0]);
        puzzle.carry_to_plate(rocks[2]);
        puzzle.click(rocks[1]);

        for rock in &rocks {
            let owner = puzzle.owner(*rock);
            let in_hand = puzzle.held() == Some(*rock);
            let slots: Vec<usize> = (0..puzzle.plate().slot_count())
                .filter(|index| puzzle.plate().slot(*index).map(|slot| slot.rock) == Some(*rock))
                .collect();

            match owner {
                ItemOwner::World => assert!(!in_hand && slots.is_empty()),
                ItemOwner::Hand { actor } => {
                    assert_eq!(actor, puzzle.actor);
                    assert!(in_hand && slots.is_empty());
                }
                ItemOwner::PlateSlot { plate, slot } => {
                    assert_eq!(plate, puzzle.plate);
                    assert!(!in_hand);
                    assert_eq!(slots, vec![slot]);
                }
            }
        }
        assert_eq!(puzzle.plate().current_weight(), 18.0);
    }

    #[test]
    fn plate_sinks_and_carries_snapped_rocks_with_it() {
        let mut puzzle = Puzzle::new(25.0, 30.0, &[10.0]);
        let rock = puzzle.rocks[0];
        puzzle.carry_to_plate(rock);
        for _ in 0..60 {
            testing::step(&mut puzzle.app);
        }

        let expected_height = testing::PLATE_POSITION.y - 10.0 * 0.005;
        let world = puzzle.app.world();
        let plate_height = world
            .get::<Transform>(puzzle.plate)
            .expect("plate transform")
            .translation
            .y;
        assert_eq!(plate_height, expected_height);
        assert!(!puzzle.plate().motion().is_interpolating());

        let rock_position = world.get::<Transform>(rock).expect("rock").translation;
        let snap = Vec3::new(testing::PLATE_POSITION.x, expected_height, testing::PLATE_POSITION.z)
            + Vec3::new(-0.5, 0.2, -0.6);
        assert!((rock_position - snap).length() < 1e-5);
        assert!(world.get::<PhysicsBody>(rock).expect("body").kinematic);
        assert!(world.get::<Collider>(rock).expect("collider").enabled);
    }

    #[test]
    fn rock_mass_is_seeded_from_its_weight() {
        let mut puzzle = Puzzle::new(25.0, 30.0, &[12.5]);
        testing::step(&mut puzzle.app);

        let body = puzzle
            .app
            .world()
            .get::<PhysicsBody>(puzzle.rocks[0])
            .expect("body");
        assert_eq!(body.mass, 12.5);
    }

    #[test]
    fn picking_up_a_second_rock_drops_the_first_forward() {
        let mut puzzle = Puzzle::new(25.0, 30.0, &[10.0, 10.0]);
        let (first, second) = (puzzle.rocks[0], puzzle.rocks[1]);

        puzzle.click(first);
        assert_eq!(puzzle.held(), Some(first));
        puzzle.click(second);

        let actor = puzzle.actor;
        assert_eq!(puzzle.held(), Some(second));
        assert_eq!(puzzle.owner(second), ItemOwner::Hand { actor });
        assert_eq!(puzzle.owner(first), ItemOwner::World);

        let world = puzzle.app.world();
        assert!(world.get::<Collider>(first).expect("collider").enabled);
        assert!(!world.get::<PhysicsBody>(first).expect("body").kinematic);

        let facing =
            Transform::from_translation(ACTOR_POSITION).looking_at(LOOSE_POSITIONS[1], Vec3::Y);
        let settings = InventorySettings::default();
        let expected = facing.transform_point(settings.hold_anchor) + facing.forward() * 1.5;
        let dropped_at = world.get::<Transform>(first).expect("rock").translation;
        assert!((dropped_at - expected).length() < 1e-4);

        let hands: Vec<bool> = world
            .resource::<Recorded<HandChanged>>()
            .0
            .iter()
            .map(|event| event.occupied)
            .collect();
        assert_eq!(hands, vec![true, false, true]);
    }
}
