//! Systems for the world module.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    math::primitives::Plane3d,
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    interaction::{
        components::{Collider, CollisionLayers},
        config::InteractionSettings,
    },
    inventory::{components::InventorySlot, config::InventorySettings},
    world::components::{FirstPersonCamera, PrimarySun},
};

const GROUND_SIZE: f32 = 40.0;
const PLAYER_START_POS: Vec3 = Vec3::new(0.0, 1.6, 2.0);
const PLAYER_LOOK_TARGET: Vec3 = Vec3::new(0.0, 0.6, -5.0);

/// Spawns the ground, the sun, and the first-person player.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    interaction: Res<InteractionSettings>,
    inventory: Res<InventorySettings>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(110, 104, 92),
            perceptual_roughness: 0.95,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::new(GROUND_SIZE, 1.0, GROUND_SIZE)),
        Collider::cuboid(
            Vec3::new(GROUND_SIZE * 0.5, 0.01, GROUND_SIZE * 0.5),
            CollisionLayers::WORLD,
        ),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, 6.0).looking_at(Vec3::ZERO, Vec3::Y),
        PrimarySun,
    ));

    let camera_transform =
        Transform::from_translation(PLAYER_START_POS).looking_at(PLAYER_LOOK_TARGET, Vec3::Y);

    let player = commands
        .spawn((
            Camera3d::default(),
            camera_transform,
            FirstPersonCamera::facing(&camera_transform),
            interaction.interactor(),
            InventorySlot::new(inventory.hold_anchor),
        ))
        .id();
    info!(
        "Player {} spawned with interaction range {:.2}",
        player, interaction.max_range
    );
}

/// Locks the cursor on left click and releases it on Escape.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if mouse_buttons.just_pressed(MouseButton::Left) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if keyboard.just_pressed(KeyCode::Escape) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Applies mouse look while the cursor is locked.
pub fn first_person_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    cursor_options: Single<&CursorOptions>,
    time: Res<Time>,
    mut player: Single<(&mut FirstPersonCamera, &mut Transform)>,
) {
    let mouse_delta: Vec2 = motion_events.read().map(|motion| motion.delta).sum();
    if cursor_options.grab_mode != CursorGrabMode::Locked || mouse_delta == Vec2::ZERO {
        return;
    }

    let (camera, transform) = &mut *player;
    transform.rotation = camera.turn(mouse_delta, time.delta_secs());
}

/// Walks the player across the ground plane with WASD; Left Ctrl sprints.
pub fn first_person_translate(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut player: Single<(&FirstPersonCamera, &mut Transform)>,
) {
    let axis = |positive: KeyCode, negative: KeyCode| {
        keyboard.pressed(positive) as i8 as f32 - keyboard.pressed(negative) as i8 as f32
    };
    let intent = Vec2::new(
        axis(KeyCode::KeyD, KeyCode::KeyA),
        axis(KeyCode::KeyW, KeyCode::KeyS),
    );
    if intent == Vec2::ZERO {
        return;
    }

    let (camera, transform) = &mut *player;
    transform.translation += camera.walk(
        intent,
        keyboard.pressed(KeyCode::ControlLeft),
        time.delta_secs(),
    );
}
