//! Components describing interactors, interactables, and the colliders rays are cast against.
use std::fmt;

use bevy::prelude::*;
use bitflags::bitflags;

use super::errors::InteractionConfigError;

bitflags! {
    /// Collision layers used to filter interaction ray casts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionLayers: u32 {
        const WORLD = 1 << 0;
        const INTERACTABLE = 1 << 1;
        const DOOR = 1 << 2;
    }
}

impl CollisionLayers {
    /// Parses a list of layer names (case-insensitive). Unknown names are returned as the error.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self, String> {
        let mut layers = Self::empty();
        for name in names {
            let normalised = name.as_ref().trim().to_ascii_uppercase();
            match Self::from_name(&normalised) {
                Some(layer) => layers |= layer,
                None => return Err(name.as_ref().to_string()),
            }
        }
        Ok(layers)
    }
}

/// The closed set of interactable kinds the runtime knows how to gate and label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InteractableKind {
    Rock,
    PressurePlate,
    LightPillar,
    PictureTile,
    /// Authored with a tag the runtime does not recognise; every lookup takes its default arm.
    Unrecognized(String),
}

impl InteractableKind {
    /// Resolves an authored tag such as `"pressure_plate"`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "rock" => Self::Rock,
            "pressure_plate" => Self::PressurePlate,
            "light_pillar" => Self::LightPillar,
            "picture_tile" => Self::PictureTile,
            _ => Self::Unrecognized(tag.to_string()),
        }
    }
}

impl fmt::Display for InteractableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rock => write!(f, "rock"),
            Self::PressurePlate => write!(f, "pressure plate"),
            Self::LightPillar => write!(f, "light pillar"),
            Self::PictureTile => write!(f, "picture tile"),
            Self::Unrecognized(tag) => write!(f, "unrecognized ({})", tag),
        }
    }
}

/// Marks an entity the interaction ray can target.
#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub kind: InteractableKind,
}

impl Interactable {
    pub fn new(kind: InteractableKind) -> Self {
        Self { kind }
    }
}

/// Terminal piece of a light puzzle; pillars carrying it no longer offer an interaction.
#[derive(Component, Debug, Default)]
pub struct TerminalMarker;

/// An actor that looks for interactables along its forward direction.
#[derive(Component, Debug, Clone)]
#[require(LookTracker)]
pub struct Interactor {
    /// World-space offset added to the actor's position before casting.
    pub ray_offset: Vec3,
    pub max_range: f32,
    pub layers: CollisionLayers,
}

impl Default for Interactor {
    fn default() -> Self {
        Self {
            ray_offset: Vec3::ZERO,
            max_range: 2.5,
            layers: CollisionLayers::all(),
        }
    }
}

/// The interactable an actor looked at during the previous tick.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookTracker {
    target: Option<Entity>,
}

impl LookTracker {
    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    /// Records this tick's target. Returns `true` only when it differs from the previous one.
    pub fn observe(&mut self, target: Option<Entity>) -> bool {
        if self.target == target {
            return false;
        }
        self.target = target;
        true
    }
}

/// Attached to an actor whose required collaborators were missing when it was validated.
#[derive(Component, Debug, Clone)]
pub struct InteractorFault {
    pub error: InteractionConfigError,
}

/// Geometry used when casting interaction rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    /// Axis-aligned box; the entity's rotation is ignored.
    Box { half_extents: Vec3 },
}

/// Collision volume of an entity. Disabled colliders are skipped by ray casts.
#[derive(Component, Debug, Clone, Copy)]
pub struct Collider {
    pub shape: ColliderShape,
    pub layers: CollisionLayers,
    pub enabled: bool,
}

impl Collider {
    pub fn sphere(radius: f32, layers: CollisionLayers) -> Self {
        Self {
            shape: ColliderShape::Sphere {
                radius: radius.max(0.0),
            },
            layers,
            enabled: true,
        }
    }

    pub fn cuboid(half_extents: Vec3, layers: CollisionLayers) -> Self {
        Self {
            shape: ColliderShape::Box {
                half_extents: half_extents.abs(),
            },
            layers,
            enabled: true,
        }
    }
}
