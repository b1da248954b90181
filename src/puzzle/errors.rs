//! Errors raised while building pressure plates and placing rocks on them.
use std::fmt;

/// A plate's authored configuration cannot produce a working plate.
#[derive(Debug, Clone, PartialEq)]
pub enum PlateConfigError {
    InvertedWeightWindow { min: f32, max: f32 },
    NonPositiveShiftSpeed { shift_speed: f32 },
    NegativeResistance { resistance: f32 },
    NonPositiveSnapEpsilon { epsilon: f32 },
    NoSnapPoints,
}

impl fmt::Display for PlateConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedWeightWindow { min, max } => {
                write!(f, "Minimum weight {:.2} exceeds maximum {:.2}", min, max)
            }
            Self::NonPositiveShiftSpeed { shift_speed } => {
                write!(f, "Shift speed must be positive (got {:.3})", shift_speed)
            }
            Self::NegativeResistance { resistance } => {
                write!(
                    f,
                    "Push-down resistance must not be negative (got {:.4})",
                    resistance
                )
            }
            Self::NonPositiveSnapEpsilon { epsilon } => {
                write!(f, "Snap epsilon must be positive (got {})", epsilon)
            }
            Self::NoSnapPoints => write!(f, "Plate has no snap points"),
        }
    }
}

impl std::error::Error for PlateConfigError {}

/// Why a held rock could not be placed on a plate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    NoSuchSlot { slot: usize, slots: usize },
    SlotOccupied { slot: usize },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchSlot { slot, slots } => {
                write!(f, "Snap slot {} does not exist (plate has {})", slot, slots)
            }
            Self::SlotOccupied { slot } => write!(f, "Snap slot {} is already occupied", slot),
        }
    }
}

impl std::error::Error for PlacementError {}
