//! Minimal door driven by coarse commands from a pressure plate.
//!
//! Only the command contract lives here; the door's own animation belongs to presentation.
use std::fmt;

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DoorState {
    #[default]
    Closed,
    Moving,
    Open,
}

/// Commands a plate may issue to its door.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DoorCommand {
    Open,
    /// Drive fully closed; may be abrupt.
    Close,
    /// Drive toward an intermediate position proportional to the weight.
    Nudge { weight: f32 },
}

impl fmt::Display for DoorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Close => write!(f, "close"),
            Self::Nudge { weight } => write!(f, "nudge({:.2})", weight),
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct Door {
    state: DoorState,
    /// 0 = closed, 1 = fully open.
    opening: f32,
    pub nudge_per_weight: f32,
    pub lift_height: f32,
    closed_height: f32,
}

impl Door {
    pub fn new(closed_height: f32, lift_height: f32, nudge_per_weight: f32) -> Self {
        Self {
            state: DoorState::Closed,
            opening: 0.0,
            nudge_per_weight: nudge_per_weight.max(0.0),
            lift_height,
            closed_height,
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn opening(&self) -> f32 {
        self.opening
    }

    pub fn apply(&mut self, command: DoorCommand) {
        match command {
            DoorCommand::Open => {
                self.opening = 1.0;
                self.state = DoorState::Open;
            }
            DoorCommand::Close => {
                self.opening = 0.0;
                self.state = DoorState::Closed;
            }
            DoorCommand::Nudge { weight } => {
                self.opening = (weight * self.nudge_per_weight).clamp(0.0, 1.0);
                self.state = DoorState::Moving;
            }
        }
    }

    pub fn height(&self) -> f32 {
        self.closed_height + self.opening * self.lift_height
    }
}

/// Snaps each door's transform to its commanded opening.
pub fn apply_door_pose(mut doors: Query<(&Door, &mut Transform), Changed<Door>>) {
    for (door, mut transform) in doors.iter_mut() {
        transform.translation.y = door.height();
    }
}
