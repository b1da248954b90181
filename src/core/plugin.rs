//! CorePlugin installs the frame ordering and drives the simulation clock.
use std::time::Duration;

use bevy::prelude::*;

use super::{
    clock::{SimulationClock, DEFAULT_MAX_STEP, DEFAULT_TIME_SCALE},
    schedule::{configure_tick_sets, TickSet},
};

#[cfg(feature = "core_debug")]
#[derive(Resource)]
struct ClockReportTimer(Timer);

#[derive(Debug, Clone, Copy)]
pub struct CorePlugin {
    time_scale: f32,
    max_step: Duration,
}

impl CorePlugin {
    #[allow(dead_code)]
    pub const fn with_time_scale(time_scale: f32) -> Self {
        Self {
            time_scale,
            max_step: DEFAULT_MAX_STEP,
        }
    }
}

impl Default for CorePlugin {
    fn default() -> Self {
        Self {
            time_scale: DEFAULT_TIME_SCALE,
            max_step: DEFAULT_MAX_STEP,
        }
    }
}

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        configure_tick_sets(app);

        app.insert_resource(SimulationClock::new(self.time_scale).with_max_step(self.max_step))
            .add_systems(Startup, log_clock_settings)
            .add_systems(
                Update,
                (toggle_pause, advance_simulation_clock)
                    .chain()
                    .in_set(TickSet::Clock),
            );

        #[cfg(feature = "core_debug")]
        {
            app.insert_resource(ClockReportTimer(Timer::from_seconds(
                1.0,
                TimerMode::Repeating,
            )))
            .add_systems(Update, report_clock.in_set(TickSet::Presentation));
        }
    }
}

fn advance_simulation_clock(mut clock: ResMut<SimulationClock>, time: Res<Time>) {
    clock.tick(time.delta());
}

/// `P` freezes plate motion and telemetry time; input and rays keep running.
fn toggle_pause(keyboard: Option<Res<ButtonInput<KeyCode>>>, mut clock: ResMut<SimulationClock>) {
    if !keyboard.is_some_and(|keyboard| keyboard.just_pressed(KeyCode::KeyP)) {
        return;
    }

    let paused = !clock.is_paused();
    clock.set_paused(paused);
    info!(
        "Simulation {} at frame {}",
        if paused { "paused" } else { "resumed" },
        clock.frame()
    );
}

fn log_clock_settings(clock: Res<SimulationClock>) {
    info!(
        "CorePlugin initialised with time scale {:.3}",
        clock.time_scale()
    );
}

#[cfg(feature = "core_debug")]
fn report_clock(mut timer: ResMut<ClockReportTimer>, clock: Res<SimulationClock>) {
    if timer.0.tick(clock.last_real_delta()).just_finished() {
        info!(
            target: "core_debug",
            "frame {} | sim {:.2}s | scale {:.3} | real dt {:.4}s | sim dt {:.4}s",
            clock.frame(),
            clock.elapsed().as_secs_f32(),
            clock.time_scale(),
            clock.last_real_delta().as_secs_f32(),
            clock.last_scaled_delta().as_secs_f32(),
        );
    }
}
