//! Inventory tuning loaded from `config/inventory.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/inventory.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawInventoryConfig {
    #[serde(default)]
    hand: RawHandSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawHandSection {
    hold_anchor: [f32; 3],
    drop_distance: f32,
}

impl Default for RawHandSection {
    fn default() -> Self {
        Self {
            hold_anchor: [0.35, -0.3, -0.8],
            drop_distance: 1.5,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct InventorySettings {
    pub hold_anchor: Vec3,
    /// How far in front of its hold position a dropped object lands.
    pub drop_distance: f32,
}

impl InventorySettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInventoryConfig::default().into()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawInventoryConfig::default().into()
            }
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawInventoryConfig>(raw).map(Into::into)
    }
}

impl Default for InventorySettings {
    fn default() -> Self {
        RawInventoryConfig::default().into()
    }
}

impl From<RawInventoryConfig> for InventorySettings {
    fn from(value: RawInventoryConfig) -> Self {
        Self {
            hold_anchor: Vec3::from_array(value.hand.hold_anchor),
            drop_distance: value.hand.drop_distance.max(0.0),
        }
    }
}
