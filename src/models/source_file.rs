use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CompareError, Result};

/// Which recording system produced a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Instrument {
    /// Reference dropsonde system
    Avaps,
    /// Comparison sounding system
    Acs,
}

impl Instrument {
    pub fn display_name(&self) -> &'static str {
        match self {
            Instrument::Avaps => "AVAPS",
            Instrument::Acs => "ACS",
        }
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Launch timestamp recovered from a file name, split into its date and
/// time-of-day fields.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
    /// YYYYMMDD
    pub date: u32,
    /// HHMMSS
    pub time: u32,
}

impl Timestamp {
    /// Parses a `YYYYMMDD_HHMMSS` string.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = || CompareError::InvalidTimestamp(raw.to_string());
        let (date, time) = raw.split_once('_').ok_or_else(invalid)?;
        if date.len() != 8 || time.len() != 6 {
            return Err(invalid());
        }
        Ok(Self {
            date: date.parse().map_err(|_| invalid())?,
            time: time.parse().map_err(|_| invalid())?,
        })
    }

    /// Literal base-10 distance between the HHMMSS fields, or `None` when
    /// the dates differ. Launches on different days never pair up.
    pub fn distance(&self, other: &Timestamp) -> Option<i64> {
        (self.date == other.date).then(|| (self.time as i64 - other.time as i64).abs())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:08}_{:06}", self.date, self.time)
    }
}

/// A data file discovered on disk, classified and timestamped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub instrument: Instrument,
    pub timestamp: Timestamp,
}

impl SourceFile {
    pub fn new(path: PathBuf, instrument: Instrument, timestamp: Timestamp) -> Self {
        Self {
            path,
            instrument,
            timestamp,
        }
    }

    /// File name without its directory, for report and log output
    pub fn file_name(&self) -> String {
        Path::new(&self.path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
