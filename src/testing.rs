//! App builders and message recorders shared by the system tests.
use std::time::Duration;

use bevy::{ecs::message::Message, prelude::*};

use crate::{
    core::{schedule::configure_tick_sets, SimulationClock, TickSet},
    interaction::{
        components::{Collider, CollisionLayers, Interactor},
        config::InteractionSettings,
        events::{InteractRequested, TooltipChanged},
        input::{InteractionInput, MouseClick},
        InteractionPlugin,
    },
    inventory::{
        components::InventorySlot, config::InventorySettings, events::HandChanged,
        InventoryPlugin,
    },
    puzzle::{
        components::Rock,
        door::Door,
        events::DoorCommandIssued,
        plate::{PlateSettings, PressurePlate},
        PuzzlePlugin,
    },
};

pub const PLATE_POSITION: Vec3 = Vec3::new(0.0, -1.0, -2.0);
pub const TICK: Duration = Duration::from_millis(16);

/// Every message of type `T` written since the app was built.
#[derive(Resource)]
pub struct Recorded<T>(pub Vec<T>);

impl<T> Default for Recorded<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn record<T: Message + Clone>(mut reader: MessageReader<T>, mut recorded: ResMut<Recorded<T>>) {
    recorded.0.extend(reader.read().cloned());
}

fn add_recorder<T: Message + Clone>(app: &mut App) {
    app.init_resource::<Recorded<T>>()
        .add_systems(Update, record::<T>.in_set(TickSet::Presentation));
}

/// Headless app running the interaction runtime with default tuning and no files on disk.
pub fn puzzle_app() -> App {
    let mut app = App::new();
    configure_tick_sets(&mut app);
    app.insert_resource(SimulationClock::default())
        .insert_resource(InteractionSettings::default())
        .insert_resource(InventorySettings::default())
        .add_plugins((
            InteractionPlugin,
            InventoryPlugin,
            PuzzlePlugin::without_history_log(),
        ));

    add_recorder::<TooltipChanged>(&mut app);
    add_recorder::<InteractRequested>(&mut app);
    add_recorder::<HandChanged>(&mut app);
    add_recorder::<DoorCommandIssued>(&mut app);
    app
}

/// An actor at `position` looking down -Z with an empty hand.
pub fn spawn_actor(app: &mut App, position: Vec3) -> Entity {
    let hold_anchor = InventorySettings::default().hold_anchor;
    app.world_mut()
        .spawn((
            Interactor::default(),
            InventorySlot::new(hold_anchor),
            Transform::from_translation(position),
        ))
        .id()
}

pub fn spawn_rock(app: &mut App, weight: f32, slot_index: usize, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Rock::new(weight, slot_index),
            Collider::sphere(0.2, CollisionLayers::INTERACTABLE),
            Transform::from_translation(position),
        ))
        .id()
}

/// A plate below and ahead of the origin, wired to a fresh door. Snap points sit on the far
/// half of the plate so snapped rocks never shadow its centre.
pub fn spawn_plate(app: &mut App, min_weight: f32, max_weight: f32, slots: usize) -> (Entity, Entity) {
    let door = app
        .world_mut()
        .spawn((Door::new(0.0, 2.0, 0.05), Transform::from_xyz(0.0, 0.0, -6.0)))
        .id();

    let snap_points = (0..slots)
        .map(|index| Vec3::new(index as f32 * 0.5 - 0.5, 0.2, -0.6))
        .collect();
    let settings = PlateSettings {
        min_weight,
        max_weight,
        ..PlateSettings::default()
    };
    let plate = PressurePlate::new(settings, snap_points, door, PLATE_POSITION.y)
        .expect("valid plate settings");

    let plate = app
        .world_mut()
        .spawn((
            plate,
            Collider::cuboid(Vec3::new(1.0, 0.1, 1.0), CollisionLayers::INTERACTABLE),
            Transform::from_translation(PLATE_POSITION),
        ))
        .id();
    (plate, door)
}

/// Turns `actor` in place to face `target`.
pub fn look_at(app: &mut App, actor: Entity, target: Entity) {
    let target = app
        .world()
        .get::<Transform>(target)
        .expect("target transform")
        .translation;
    let mut transform = app
        .world_mut()
        .get_mut::<Transform>(actor)
        .expect("actor transform");
    let position = transform.translation;
    *transform = Transform::from_translation(position).looking_at(target, Vec3::Y);
}

/// Advances the simulation clock by one frame and runs the schedule.
pub fn step(app: &mut App) {
    app.world_mut().resource_mut::<SimulationClock>().tick(TICK);
    app.update();
}

/// Runs one tick with `click` activated, then clears the input.
pub fn press(app: &mut App, click: MouseClick) {
    app.insert_resource(InteractionInput {
        primary_activated: click == MouseClick::Primary,
        secondary_activated: click == MouseClick::Secondary,
    });
    step(app);
    app.insert_resource(InteractionInput::default());
}
