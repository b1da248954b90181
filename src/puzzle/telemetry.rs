//! Telemetry storage for rock transfers, plate weight edges, and door commands.
use std::{
    collections::VecDeque,
    fs::{create_dir_all, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use bevy::{log::warn, prelude::*};
use serde::Serialize;

use crate::core::SimulationClock;

use super::{
    door::DoorCommand,
    events::{DoorCommandIssued, PlateWeightChanged, RockPickedUp, RockPlaced},
};

const DEFAULT_PUZZLE_TELEMETRY_LOG_PATH: &str = "logs/puzzle_history.jsonl";

const DEFAULT_PUZZLE_TELEMETRY_CAPACITY: usize = 128;

/// Rolling history of puzzle activity for debugging overlays and tests.
#[derive(Resource, Debug)]
pub struct PuzzleTelemetry {
    capacity: usize,
    records: VecDeque<PuzzleTelemetryRecord>,
}

impl PuzzleTelemetry {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            records: VecDeque::new(),
        }
    }

    pub fn push(&mut self, record: PuzzleTelemetryRecord) {
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }
        self.records.push_back(record);
    }

    #[allow(dead_code)]
    pub fn records(&self) -> impl Iterator<Item = &PuzzleTelemetryRecord> {
        self.records.iter()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for PuzzleTelemetry {
    fn default() -> Self {
        Self::new(DEFAULT_PUZZLE_TELEMETRY_CAPACITY)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PuzzleTelemetryRecord {
    pub occurred_at_seconds: f64,
    pub event: PuzzleTelemetryEvent,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PuzzleTelemetryEvent {
    Picked(RockPickedUp),
    Placed(RockPlaced),
    Weight(PlateWeightChanged),
    Door(DoorCommandIssued),
}

/// Records this tick's puzzle messages, stamped with simulation time.
pub fn record_puzzle_telemetry(
    clock: Res<SimulationClock>,
    mut telemetry: ResMut<PuzzleTelemetry>,
    mut log: Option<ResMut<PuzzleTelemetryLog>>,
    mut picked: MessageReader<RockPickedUp>,
    mut placed: MessageReader<RockPlaced>,
    mut weights: MessageReader<PlateWeightChanged>,
    mut doors: MessageReader<DoorCommandIssued>,
) {
    let now = clock.elapsed().as_secs_f64();

    let events = picked
        .read()
        .copied()
        .map(PuzzleTelemetryEvent::Picked)
        .chain(placed.read().copied().map(PuzzleTelemetryEvent::Placed))
        .chain(weights.read().copied().map(PuzzleTelemetryEvent::Weight))
        .chain(doors.read().copied().map(PuzzleTelemetryEvent::Door));

    for event in events {
        let record = PuzzleTelemetryRecord {
            occurred_at_seconds: now,
            event,
        };
        if let Some(log) = log.as_mut() {
            log.push(&record);
        }
        telemetry.push(record);
    }
}

/// Pending records waiting to be appended to a JSON lines file.
#[derive(Resource, Debug)]
pub struct PuzzleTelemetryLog {
    output_path: PathBuf,
    pending: Vec<PuzzleTelemetryRecord>,
}

impl PuzzleTelemetryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &PuzzleTelemetryRecord) {
        self.pending.push(record.clone());
    }

    /// Appends every pending record as one JSON object per line. Records are only cleared once
    /// the whole batch has been written, so a failed flush leaves them pending for a retry.
    pub fn flush(&mut self) -> std::io::Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let mut batch = String::new();
        for record in &self.pending {
            let line =
                serde_json::to_string(&SerializablePuzzleTelemetryRecord::from(record.clone()))?;
            batch.push_str(&line);
            batch.push('\n');
        }

        if let Some(parent) = self.output_path.parent() {
            create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output_path)?;
        file.write_all(batch.as_bytes())?;
        file.flush()?;

        self.pending.clear();
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Default for PuzzleTelemetryLog {
    fn default() -> Self {
        Self::new(DEFAULT_PUZZLE_TELEMETRY_LOG_PATH)
    }
}

/// Flushes pending log entries to disk, logging a warning if persistence fails.
pub fn flush_puzzle_telemetry_log(mut log: ResMut<PuzzleTelemetryLog>) {
    if let Err(err) = log.flush() {
        warn!(
            "Failed to persist puzzle telemetry to {:?}: {}",
            log.path(),
            err
        );
    }
}

#[derive(Serialize)]
struct SerializablePuzzleTelemetryRecord {
    occurred_at_seconds: f64,
    event: SerializablePuzzleTelemetryEvent,
}

impl From<PuzzleTelemetryRecord> for SerializablePuzzleTelemetryRecord {
    fn from(value: PuzzleTelemetryRecord) -> Self {
        Self {
            occurred_at_seconds: value.occurred_at_seconds,
            event: value.event.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
enum SerializablePuzzleTelemetryEvent {
    RockPickedUp {
        rock: String,
        actor: String,
    },
    RockPlaced {
        rock: String,
        plate: String,
        slot: usize,
    },
    PlateWeightChanged {
        plate: String,
        previous: f32,
        current: f32,
    },
    DoorCommand {
        plate: String,
        door: String,
        command: SerializableDoorCommand,
    },
}

impl From<PuzzleTelemetryEvent> for SerializablePuzzleTelemetryEvent {
    fn from(value: PuzzleTelemetryEvent) -> Self {
        match value {
            PuzzleTelemetryEvent::Picked(event) => Self::RockPickedUp {
                rock: event.rock.to_string(),
                actor: event.actor.to_string(),
            },
            PuzzleTelemetryEvent::Placed(event) => Self::RockPlaced {
                rock: event.rock.to_string(),
                plate: event.plate.to_string(),
                slot: event.slot,
            },
            PuzzleTelemetryEvent::Weight(event) => Self::PlateWeightChanged {
                plate: event.plate.to_string(),
                previous: event.previous,
                current: event.current,
            },
            PuzzleTelemetryEvent::Door(event) => Self::DoorCommand {
                plate: event.plate.to_string(),
                door: event.door.to_string(),
                command: event.command.into(),
            },
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SerializableDoorCommand {
    Open,
    Close,
    Nudge { weight: f32 },
}

impl From<DoorCommand> for SerializableDoorCommand {
    fn from(value: DoorCommand) -> Self {
        match value {
            DoorCommand::Open => Self::Open,
            DoorCommand::Close => Self::Close,
            DoorCommand::Nudge { weight } => Self::Nudge { weight },
        }
    }
}
