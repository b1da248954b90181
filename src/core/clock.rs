//! Scaled, pausable simulation time shared by plate motion and telemetry.
use std::time::Duration;

use bevy::prelude::*;

pub(super) const DEFAULT_TIME_SCALE: f32 = 1.0;
pub(super) const MIN_TIME_SCALE: f32 = 0.001;
pub(super) const DEFAULT_MAX_STEP: Duration = Duration::from_millis(100);

/// Simulation time derived from real frame deltas.
///
/// A single frame never advances the simulation by more than `max_step`
/// (before scaling), so a hitch cannot teleport a plate to its target.
#[derive(Resource, Debug, Clone)]
pub struct SimulationClock {
    scale: f32,
    max_step: Duration,
    paused: bool,
    frame: u64,
    real_delta: Duration,
    scaled_delta: Duration,
    elapsed: Duration,
}

impl SimulationClock {
    pub fn new(time_scale: f32) -> Self {
        Self {
            scale: time_scale.max(MIN_TIME_SCALE),
            max_step: DEFAULT_MAX_STEP,
            paused: false,
            frame: 0,
            real_delta: Duration::ZERO,
            scaled_delta: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_max_step(mut self, max_step: Duration) -> Self {
        self.max_step = max_step;
        self
    }

    pub fn set_time_scale(&mut self, scale: f32) {
        self.scale = scale.max(MIN_TIME_SCALE);
    }

    pub fn time_scale(&self) -> f32 {
        self.scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Number of ticks applied so far, paused ones included.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[cfg_attr(not(feature = "core_debug"), allow(dead_code))]
    pub fn last_real_delta(&self) -> Duration {
        self.real_delta
    }

    /// Simulation seconds covered by the latest tick; zero while paused.
    pub fn last_scaled_delta(&self) -> Duration {
        self.scaled_delta
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn tick(&mut self, real_delta: Duration) {
        self.frame += 1;
        self.real_delta = real_delta;
        self.scaled_delta = if self.paused {
            Duration::ZERO
        } else {
            real_delta.min(self.max_step).mul_f32(self.scale)
        };
        self.elapsed += self.scaled_delta;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}
