//! Interaction ray settings loaded from `config/interaction.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::components::{CollisionLayers, Interactor};

const CONFIG_PATH: &str = "config/interaction.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInteractionConfig {
    #[serde(default)]
    ray: RawRaySection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawRaySection {
    max_range: f32,
    offset: [f32; 3],
    layers: Vec<String>,
}

impl Default for RawRaySection {
    fn default() -> Self {
        Self {
            max_range: 2.5,
            offset: [0.0, 0.0, 0.0],
            layers: vec!["interactable".to_string(), "world".to_string()],
        }
    }
}

/// Ray parameters handed to every spawned [`Interactor`].
#[derive(Resource, Debug, Clone)]
pub struct InteractionSettings {
    pub max_range: f32,
    pub ray_offset: Vec3,
    pub layers: CollisionLayers,
}

impl InteractionSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInteractionConfig::default().into()
            }
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawInteractionConfig>(raw).map(Into::into)
    }

    pub fn interactor(&self) -> Interactor {
        Interactor {
            ray_offset: self.ray_offset,
            max_range: self.max_range,
            layers: self.layers,
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        RawInteractionConfig::default().into()
    }
}

impl From<RawInteractionConfig> for InteractionSettings {
    fn from(value: RawInteractionConfig) -> Self {
        let ray = value.ray;
        let layers = match CollisionLayers::from_names(&ray.layers) {
            Ok(layers) if !layers.is_empty() => layers,
            Ok(_) => {
                warn!("No interaction layers configured; casting against every layer");
                CollisionLayers::all()
            }
            Err(unknown) => {
                warn!(
                    "Unknown collision layer '{}' in {}; casting against every layer",
                    unknown, CONFIG_PATH
                );
                CollisionLayers::all()
            }
        };

        Self {
            max_range: ray.max_range.max(0.0),
            ray_offset: Vec3::from_array(ray.offset),
            layers,
        }
    }
}
