use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::parameter::{Parameter, PARAMETER_COUNT};
use crate::utils::constants::TIME_KEY_SCALE;

/// Elapsed time quantized to two decimal places, stored as a centisecond
/// count so it can serve as an exact, ordered join key.
///
/// The rounding absorbs sub-sample jitter between the two recordings while
/// preserving quarter-second resolution.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TimeKey(i64);

impl TimeKey {
    pub fn from_seconds(seconds: f64) -> Self {
        Self((seconds * TIME_KEY_SCALE).round() as i64)
    }

    pub fn seconds(&self) -> f64 {
        self.0 as f64 / TIME_KEY_SCALE
    }
}

impl std::fmt::Display for TimeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.seconds())
    }
}

/// Parameter readings at one time step. A `None` means the raw record held
/// the sentinel (or nothing parseable) for that column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoundingRow {
    values: [Option<f64>; PARAMETER_COUNT],
}

impl SoundingRow {
    pub fn get(&self, parameter: Parameter) -> Option<f64> {
        self.values[parameter.index()]
    }

    pub fn set(&mut self, parameter: Parameter, value: f64) {
        self.values[parameter.index()] = Some(value);
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.is_none())
    }
}

/// One instrument's recording, indexed by quantized elapsed time.
///
/// Built once by the reader and never mutated afterwards. A later data row
/// with the same quantized time overwrites the values it carries, parameter
/// by parameter (last write wins).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundingProfile {
    rows: BTreeMap<TimeKey, SoundingRow>,
}

impl SoundingProfile {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, time: TimeKey, parameter: Parameter, value: f64) {
        self.rows.entry(time).or_default().set(parameter, value);
    }

    pub fn value(&self, time: TimeKey, parameter: Parameter) -> Option<f64> {
        self.rows.get(&time).and_then(|row| row.get(parameter))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Time keys present in both profiles, ascending
    pub fn common_times(&self, other: &SoundingProfile) -> Vec<TimeKey> {
        self.rows
            .keys()
            .filter(|time| other.rows.contains_key(time))
            .copied()
            .collect()
    }
}
