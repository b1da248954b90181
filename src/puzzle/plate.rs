//! Pressure plate state: snap slots, aggregate weight, door decisions, and smoothed motion.
use bevy::{math::FloatExt, prelude::*};

use crate::interaction::components::{Interactable, InteractableKind};

use super::{
    components::SubscriptionId,
    door::{DoorCommand, DoorState},
    errors::{PlacementError, PlateConfigError},
};

/// Authored tuning of a single plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateSettings {
    pub min_weight: f32,
    pub max_weight: f32,
    /// Seconds a height transition takes.
    pub shift_speed: f32,
    /// Height change per unit of weight change.
    pub push_down_resistance: f32,
    /// Distance under which the moving part snaps onto its target height.
    pub snap_epsilon: f32,
}

impl Default for PlateSettings {
    fn default() -> Self {
        Self {
            min_weight: 25.0,
            max_weight: 30.0,
            shift_speed: 0.5,
            push_down_resistance: 0.005,
            snap_epsilon: 0.001,
        }
    }
}

impl PlateSettings {
    pub fn validate(&self) -> Result<(), PlateConfigError> {
        if self.min_weight > self.max_weight {
            return Err(PlateConfigError::InvertedWeightWindow {
                min: self.min_weight,
                max: self.max_weight,
            });
        }
        if self.shift_speed <= 0.0 {
            return Err(PlateConfigError::NonPositiveShiftSpeed {
                shift_speed: self.shift_speed,
            });
        }
        if self.push_down_resistance < 0.0 {
            return Err(PlateConfigError::NegativeResistance {
                resistance: self.push_down_resistance,
            });
        }
        if self.snap_epsilon <= 0.0 {
            return Err(PlateConfigError::NonPositiveSnapEpsilon {
                epsilon: self.snap_epsilon,
            });
        }
        Ok(())
    }

    /// Inclusive `[min, max]` window in which the door opens fully.
    pub fn in_window(&self, weight: f32) -> bool {
        weight >= self.min_weight && weight <= self.max_weight
    }
}

/// Edge in the aggregate weight between two ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightChange {
    pub previous: f32,
    pub current: f32,
}

impl WeightChange {
    pub fn increased(&self) -> bool {
        self.current > self.previous
    }
}

/// Decides which command, if any, a weight edge sends to the door.
pub fn door_command_for(
    change: WeightChange,
    settings: &PlateSettings,
    door: DoorState,
) -> Option<DoorCommand> {
    let weight = change.current;
    let nudge = DoorCommand::Nudge { weight };

    if settings.in_window(weight) {
        return Some(DoorCommand::Open);
    }

    if change.increased() {
        if weight < settings.min_weight {
            Some(nudge)
        } else if weight > settings.max_weight && door != DoorState::Closed {
            Some(DoorCommand::Close)
        } else {
            None
        }
    } else if weight > 0.0 && weight < settings.min_weight {
        Some(nudge)
    } else if (weight > settings.max_weight || weight == 0.0) && door != DoorState::Closed {
        Some(DoorCommand::Close)
    } else {
        None
    }
}

/// Smoothed height transition of the plate's moving part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlateMotion {
    start_height: f32,
    target_height: f32,
    elapsed: f32,
    interpolating: bool,
}

impl PlateMotion {
    pub fn new(height: f32) -> Self {
        Self {
            start_height: height,
            target_height: height,
            elapsed: 0.0,
            interpolating: false,
        }
    }

    pub fn target_height(&self) -> f32 {
        self.target_height
    }

    pub fn is_interpolating(&self) -> bool {
        self.interpolating
    }

    /// Starts a new transition from the current target, discarding any transition in progress.
    pub fn retarget(&mut self, change: WeightChange, resistance: f32) {
        let delta = (change.current - change.previous).abs() * resistance;
        self.start_height = self.target_height;
        self.target_height = if change.increased() {
            self.start_height - delta
        } else {
            self.start_height + delta
        };
        self.elapsed = 0.0;
        self.interpolating = true;
    }

    /// Advances the transition and returns the height to apply this tick. The transition ends
    /// when the height comes within `epsilon` of the target, which is then applied exactly.
    pub fn advance(&mut self, delta_seconds: f32, shift_speed: f32, epsilon: f32) -> Option<f32> {
        if !self.interpolating {
            return None;
        }

        self.elapsed += delta_seconds.max(0.0);
        let progress = (self.elapsed / shift_speed).clamp(0.0, 1.0);
        let height = self.start_height.lerp(self.target_height, progress);

        if progress >= 1.0 || (height - self.target_height).abs() < epsilon {
            self.interpolating = false;
            Some(self.target_height)
        } else {
            Some(height)
        }
    }
}

/// A rock snapped into one slot of a plate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapSlot {
    pub rock: Entity,
    pub weight: f32,
    pub subscription: SubscriptionId,
}

/// Weight-triggered plate that drives a door.
#[derive(Component, Debug, Clone)]
#[require(Interactable = Interactable::new(InteractableKind::PressurePlate))]
pub struct PressurePlate {
    settings: PlateSettings,
    /// Snap positions local to the plate, indexed by the rocks' static slot index.
    snap_points: Vec<Vec3>,
    slots: Vec<Option<SnapSlot>>,
    door: Entity,
    last_weight: f32,
    motion: PlateMotion,
}

impl PressurePlate {
    pub fn new(
        settings: PlateSettings,
        snap_points: Vec<Vec3>,
        door: Entity,
        initial_height: f32,
    ) -> Result<Self, PlateConfigError> {
        settings.validate()?;
        if snap_points.is_empty() {
            return Err(PlateConfigError::NoSnapPoints);
        }

        Ok(Self {
            settings,
            slots: vec![None; snap_points.len()],
            snap_points,
            door,
            last_weight: 0.0,
            motion: PlateMotion::new(initial_height),
        })
    }

    pub fn settings(&self) -> &PlateSettings {
        &self.settings
    }

    pub fn door(&self) -> Entity {
        self.door
    }

    pub fn motion(&self) -> &PlateMotion {
        &self.motion
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, index: usize) -> Option<&SnapSlot> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn snap_point(&self, index: usize) -> Option<Vec3> {
        self.snap_points.get(index).copied()
    }

    /// Sum of the weights of every rock currently in a slot.
    pub fn current_weight(&self) -> f32 {
        self.slots.iter().flatten().map(|slot| slot.weight).sum()
    }

    pub fn check_placement(&self, index: usize) -> Result<(), PlacementError> {
        match self.slots.get(index) {
            None => Err(PlacementError::NoSuchSlot {
                slot: index,
                slots: self.slots.len(),
            }),
            Some(Some(_)) => Err(PlacementError::SlotOccupied { slot: index }),
            Some(None) => Ok(()),
        }
    }

    pub fn place(&mut self, index: usize, snapped: SnapSlot) -> Result<(), PlacementError> {
        self.check_placement(index)?;
        self.slots[index] = Some(snapped);
        Ok(())
    }

    /// Vacates `index` if it is still held under `subscription`. Returns the rock it held.
    pub fn release(&mut self, index: usize, subscription: SubscriptionId) -> Option<Entity> {
        let slot = self.slots.get_mut(index)?;
        if slot.is_some_and(|snapped| snapped.subscription == subscription) {
            slot.take().map(|snapped| snapped.rock)
        } else {
            None
        }
    }

    /// Compares the aggregate weight with the previous tick. On an edge the height transition is
    /// retargeted and the change returned.
    pub fn observe_weight(&mut self) -> Option<WeightChange> {
        let current = self.current_weight();
        if current == self.last_weight {
            return None;
        }

        let change = WeightChange {
            previous: self.last_weight,
            current,
        };
        self.motion
            .retarget(change, self.settings.push_down_resistance);
        self.last_weight = current;
        Some(change)
    }

    pub fn advance_motion(&mut self, delta_seconds: f32) -> Option<f32> {
        self.motion.advance(
            delta_seconds,
            self.settings.shift_speed,
            self.settings.snap_epsilon,
        )
    }
}
