//! Components used by the world module.
use bevy::prelude::*;

const PITCH_LIMIT: f32 = 1.54;

/// The player's eye: camera, interaction ray origin, and hand all hang off this entity.
#[derive(Component, Debug, Clone)]
pub struct FirstPersonCamera {
    pub yaw: f32,
    pub pitch: f32,
    /// Walking speed in metres per second.
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    pub look_sensitivity: f32,
}

impl FirstPersonCamera {
    /// Seeds yaw and pitch from an existing orientation.
    pub fn facing(transform: &Transform) -> Self {
        let forward = transform.forward().as_vec3();
        Self {
            yaw: (-forward.x).atan2(-forward.z),
            pitch: forward.y.clamp(-1.0, 1.0).asin(),
            move_speed: 4.0,
            sprint_multiplier: 1.8,
            look_sensitivity: 0.15,
        }
    }

    /// Applies a mouse delta and returns the resulting orientation.
    pub fn turn(&mut self, mouse_delta: Vec2, delta_seconds: f32) -> Quat {
        let scale = self.look_sensitivity * delta_seconds;
        self.yaw -= mouse_delta.x * scale;
        self.pitch = (self.pitch - mouse_delta.y * scale).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.rotation()
    }

    pub fn rotation(&self) -> Quat {
        (Quat::from_rotation_y(self.yaw) * Quat::from_rotation_x(self.pitch)).normalize()
    }

    /// Ground-plane displacement for `intent` (x strafes right, y walks forward).
    pub fn walk(&self, intent: Vec2, sprinting: bool, delta_seconds: f32) -> Vec3 {
        let forward = Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos());
        let right = Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
        let direction = (forward * intent.y + right * intent.x).normalize_or_zero();
        let speed = if sprinting {
            self.move_speed * self.sprint_multiplier
        } else {
            self.move_speed
        };
        direction * speed * delta_seconds
    }
}

/// Marker component identifying the main directional light (the "sun").
#[derive(Component, Default)]
pub struct PrimarySun;
