//! Puzzle layout and plate tuning loaded from `config/puzzle.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::plate::PlateSettings;

const CONFIG_PATH: &str = "config/puzzle.toml";

/// Sections missing from the file are empty; the built-in layout is only used when the file
/// cannot be read or parsed.
#[derive(Debug, Clone, Deserialize)]
struct RawPuzzleConfig {
    #[serde(default)]
    plate_defaults: RawPlateSettings,
    #[serde(default)]
    plates: Vec<RawPlateLayout>,
    #[serde(default)]
    rocks: Vec<RawRockLayout>,
    #[serde(default)]
    props: Vec<RawPropLayout>,
}

impl Default for RawPuzzleConfig {
    fn default() -> Self {
        let rock = |x: f32, z: f32, slot_index: usize| RawRockLayout {
            position: [x, 0.25, z],
            weight: 10.0,
            slot_index,
            destroy_on_pickup: false,
        };

        Self {
            plate_defaults: RawPlateSettings::default(),
            plates: vec![RawPlateLayout {
                position: [0.0, 0.05, -5.0],
                half_extents: [1.2, 0.05, 1.2],
                snap_points: vec![[-0.6, 0.3, 0.0], [0.0, 0.3, 0.0], [0.6, 0.3, 0.0]],
                min_weight: None,
                max_weight: None,
                shift_speed: None,
                push_down_resistance: None,
                door: RawDoorLayout::default(),
            }],
            rocks: vec![
                rock(-2.5, -1.0, 0),
                rock(2.5, -1.0, 1),
                rock(-2.5, 1.5, 2),
                RawRockLayout {
                    position: [2.5, 0.25, 1.5],
                    weight: 5.0,
                    slot_index: 0,
                    destroy_on_pickup: true,
                },
            ],
            props: vec![
                RawPropLayout {
                    kind: "light_pillar".to_string(),
                    position: [-4.0, 1.0, -3.0],
                    terminal: false,
                },
                RawPropLayout {
                    kind: "picture_tile".to_string(),
                    position: [4.0, 1.0, -3.0],
                    terminal: true,
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPlateSettings {
    min_weight: f32,
    max_weight: f32,
    shift_speed: f32,
    push_down_resistance: f32,
    snap_epsilon: f32,
}

impl Default for RawPlateSettings {
    fn default() -> Self {
        let defaults = PlateSettings::default();
        Self {
            min_weight: defaults.min_weight,
            max_weight: defaults.max_weight,
            shift_speed: defaults.shift_speed,
            push_down_resistance: defaults.push_down_resistance,
            snap_epsilon: defaults.snap_epsilon,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawPlateLayout {
    position: [f32; 3],
    #[serde(default = "default_plate_half_extents")]
    half_extents: [f32; 3],
    snap_points: Vec<[f32; 3]>,
    min_weight: Option<f32>,
    max_weight: Option<f32>,
    shift_speed: Option<f32>,
    push_down_resistance: Option<f32>,
    #[serde(default)]
    door: RawDoorLayout,
}

fn default_plate_half_extents() -> [f32; 3] {
    [1.0, 0.05, 1.0]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDoorLayout {
    position: [f32; 3],
    half_extents: [f32; 3],
    lift_height: f32,
    nudge_per_weight: f32,
}

impl Default for RawDoorLayout {
    fn default() -> Self {
        Self {
            position: [0.0, 1.5, -9.0],
            half_extents: [1.5, 1.5, 0.2],
            lift_height: 3.0,
            nudge_per_weight: 0.02,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawRockLayout {
    position: [f32; 3],
    weight: f32,
    slot_index: usize,
    #[serde(default)]
    destroy_on_pickup: bool,
}

#[derive(Debug, Clone, Deserialize)]
struct RawPropLayout {
    kind: String,
    position: [f32; 3],
    #[serde(default)]
    terminal: bool,
}

/// Door driven by a plate.
#[derive(Debug, Clone, PartialEq)]
pub struct DoorLayout {
    pub position: Vec3,
    pub half_extents: Vec3,
    pub lift_height: f32,
    pub nudge_per_weight: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlateLayout {
    pub position: Vec3,
    pub half_extents: Vec3,
    /// Offsets from the plate's origin, indexed by rock slot index.
    pub snap_points: Vec<Vec3>,
    pub settings: PlateSettings,
    pub door: DoorLayout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RockLayout {
    pub position: Vec3,
    pub weight: f32,
    pub slot_index: usize,
    pub destroy_on_pickup: bool,
}

/// Interactable scenery identified only by its kind tag.
#[derive(Debug, Clone, PartialEq)]
pub struct PropLayout {
    pub kind: String,
    pub position: Vec3,
    pub terminal: bool,
}

/// Level layout spawned by the world plugin.
#[derive(Resource, Debug, Clone)]
pub struct PuzzleConfig {
    pub plate_defaults: PlateSettings,
    pub plates: Vec<PlateLayout>,
    pub rocks: Vec<RockLayout>,
    pub props: Vec<PropLayout>,
}

impl PuzzleConfig {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to the built-in layout.",
                    CONFIG_PATH, err
                );
                RawPuzzleConfig::default().into()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to the built-in layout.",
                    CONFIG_PATH, err
                );
                RawPuzzleConfig::default().into()
            }
        }
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawPuzzleConfig>(raw).map(Into::into)
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        RawPuzzleConfig::default().into()
    }
}

impl From<RawPuzzleConfig> for PuzzleConfig {
    fn from(value: RawPuzzleConfig) -> Self {
        let raw = value.plate_defaults;
        let mut plate_defaults = PlateSettings {
            min_weight: raw.min_weight,
            max_weight: raw.max_weight,
            shift_speed: raw.shift_speed,
            push_down_resistance: raw.push_down_resistance,
            snap_epsilon: raw.snap_epsilon,
        };
        if let Err(err) = plate_defaults.validate() {
            warn!(
                "Invalid plate defaults in {} ({}). Using built-in tuning.",
                CONFIG_PATH, err
            );
            plate_defaults = PlateSettings::default();
        }

        let plates = value
            .plates
            .into_iter()
            .map(|plate| PlateLayout {
                position: Vec3::from_array(plate.position),
                half_extents: Vec3::from_array(plate.half_extents).abs(),
                snap_points: plate.snap_points.into_iter().map(Vec3::from_array).collect(),
                settings: PlateSettings {
                    min_weight: plate.min_weight.unwrap_or(plate_defaults.min_weight),
                    max_weight: plate.max_weight.unwrap_or(plate_defaults.max_weight),
                    shift_speed: plate.shift_speed.unwrap_or(plate_defaults.shift_speed),
                    push_down_resistance: plate
                        .push_down_resistance
                        .unwrap_or(plate_defaults.push_down_resistance),
                    snap_epsilon: plate_defaults.snap_epsilon,
                },
                door: DoorLayout {
                    position: Vec3::from_array(plate.door.position),
                    half_extents: Vec3::from_array(plate.door.half_extents).abs(),
                    lift_height: plate.door.lift_height,
                    nudge_per_weight: plate.door.nudge_per_weight.max(0.0),
                },
            })
            .collect();

        let rocks = value
            .rocks
            .into_iter()
            .map(|rock| RockLayout {
                position: Vec3::from_array(rock.position),
                weight: rock.weight.max(0.0),
                slot_index: rock.slot_index,
                destroy_on_pickup: rock.destroy_on_pickup,
            })
            .collect();

        let props = value
            .props
            .into_iter()
            .map(|prop| PropLayout {
                kind: prop.kind,
                position: Vec3::from_array(prop.position),
                terminal: prop.terminal,
            })
            .collect();

        Self {
            plate_defaults,
            plates,
            rocks,
            props,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_layout_has_a_solvable_plate() {
        let config = PuzzleConfig::default();
        assert_eq!(config.plates.len(), 1);

        let plate = &config.plates[0];
        let carried: f32 = config
            .rocks
            .iter()
            .filter(|rock| !rock.destroy_on_pickup)
            .map(|rock| rock.weight)
            .sum();
        assert!(plate.settings.in_window(carried));
        assert!(config
            .rocks
            .iter()
            .all(|rock| rock.slot_index < plate.snap_points.len()));
    }

    #[test]
    fn per_plate_overrides_take_precedence() {
        let config = PuzzleConfig::from_toml(
            r#"
            [plate_defaults]
            min_weight = 10.0
            max_weight = 12.0

            [[plates]]
            position = [0.0, 0.0, -4.0]
            snap_points = [[0.0, 0.2, 0.0]]
            max_weight = 15.0

            [plates.door]
            lift_height = 2.0

            [[rocks]]
            position = [1.0, 0.0, 0.0]
            weight = -4.0
            slot_index = 0
            "#,
        )
        .expect("valid toml");

        let plate = &config.plates[0];
        assert_eq!(plate.settings.min_weight, 10.0);
        assert_eq!(plate.settings.max_weight, 15.0);
        assert_eq!(plate.door.lift_height, 2.0);
        assert_eq!(plate.half_extents, Vec3::new(1.0, 0.05, 1.0));
        assert_eq!(config.rocks[0].weight, 0.0);
        assert!(config.props.is_empty());
    }

    #[test]
    fn inverted_defaults_fall_back_to_built_in_tuning() {
        let config = PuzzleConfig::from_toml(
            r#"
            plates = []
            [plate_defaults]
            min_weight = 40.0
            max_weight = 30.0
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.plate_defaults, PlateSettings::default());
    }

    #[test]
    fn zero_snap_epsilon_falls_back_to_built_in_tuning() {
        let config = PuzzleConfig::from_toml(
            r#"
            plates = []
            [plate_defaults]
            snap_epsilon = 0.0
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.plate_defaults, PlateSettings::default());
    }
}
