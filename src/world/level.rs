//! Spawns the configured puzzle level: plates with their doors, rocks, and props.
use bevy::prelude::*;

use crate::{
    interaction::components::{
        Collider, CollisionLayers, Interactable, InteractableKind, TerminalMarker,
    },
    puzzle::{
        components::{InteractableMaterial, Rock},
        config::{PlateLayout, PuzzleConfig},
        door::Door,
        plate::PressurePlate,
    },
};

const ROCK_RADIUS: f32 = 0.25;
const PROP_HALF_EXTENTS: Vec3 = Vec3::new(0.3, 1.0, 0.3);

pub fn spawn_puzzle_level(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PuzzleConfig>,
) {
    let stone = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(120, 116, 108),
        perceptual_roughness: 0.9,
        ..default()
    });
    let highlighted_stone = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(150, 138, 112),
        emissive: LinearRgba::rgb(0.08, 0.06, 0.02),
        perceptual_roughness: 0.8,
        ..default()
    });
    commands.insert_resource(InteractableMaterial(highlighted_stone));

    for layout in &config.plates {
        spawn_plate(&mut commands, &mut meshes, stone.clone(), layout);
    }

    let rock_mesh = meshes.add(Sphere::new(ROCK_RADIUS));
    for layout in &config.rocks {
        let mut rock = Rock::new(layout.weight, layout.slot_index);
        if layout.destroy_on_pickup {
            rock = rock.destroyed_on_pickup();
        }
        commands.spawn((
            rock,
            Collider::sphere(ROCK_RADIUS, CollisionLayers::INTERACTABLE),
            Mesh3d(rock_mesh.clone()),
            MeshMaterial3d(stone.clone()),
            Transform::from_translation(layout.position),
        ));
    }

    let prop_mesh = meshes.add(Cuboid::from_size(PROP_HALF_EXTENTS * 2.0));
    for layout in &config.props {
        let kind = InteractableKind::from_tag(&layout.kind);
        if let InteractableKind::Unrecognized(tag) = &kind {
            warn!("Prop at {} has unrecognized kind '{}'", layout.position, tag);
        }
        let mut prop = commands.spawn((
            Interactable::new(kind),
            Collider::cuboid(PROP_HALF_EXTENTS, CollisionLayers::INTERACTABLE),
            Mesh3d(prop_mesh.clone()),
            MeshMaterial3d(stone.clone()),
            Transform::from_translation(layout.position),
        ));
        if layout.terminal {
            prop.insert(TerminalMarker);
        }
    }
}

fn spawn_plate(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    layout: &PlateLayout,
) {
    let door_layout = &layout.door;
    let door = commands
        .spawn((
            Door::new(
                door_layout.position.y,
                door_layout.lift_height,
                door_layout.nudge_per_weight,
            ),
            Collider::cuboid(
                door_layout.half_extents,
                CollisionLayers::WORLD | CollisionLayers::DOOR,
            ),
            Mesh3d(meshes.add(Cuboid::from_size(door_layout.half_extents * 2.0))),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(door_layout.position),
        ))
        .id();

    let plate = match PressurePlate::new(
        layout.settings,
        layout.snap_points.clone(),
        door,
        layout.position.y,
    ) {
        Ok(plate) => plate,
        Err(err) => {
            error!(
                "Skipping pressure plate at {}: {}",
                layout.position, err
            );
            commands.entity(door).despawn();
            return;
        }
    };

    let entity = commands
        .spawn((
            plate,
            Collider::cuboid(layout.half_extents, CollisionLayers::INTERACTABLE),
            Mesh3d(meshes.add(Cuboid::from_size(layout.half_extents * 2.0))),
            MeshMaterial3d(material),
            Transform::from_translation(layout.position),
        ))
        .id();
    info!(
        "Pressure plate {} ({} slots, window {:.1}..={:.1} kg) drives door {}",
        entity,
        layout.snap_points.len(),
        layout.settings.min_weight,
        layout.settings.max_weight,
        door
    );
}
