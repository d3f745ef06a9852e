use crate::error::{CompareError, Result};
use crate::models::{Parameter, SoundingProfile, SoundingRow, TimeKey};
use crate::utils::constants::{
    DEFAULT_BUFFER_SIZE, HEADER_TOKEN, MIN_DATA_TOKENS, SENTINEL_TOLERANCE, SENTINEL_VALUE,
};
use float_cmp::approx_eq;
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Reader for whitespace-delimited sounding data files.
///
/// Everything up to and including the column-header line (first token
/// `IX`) is preamble. After that, rows that do not look like data are
/// skipped silently; a bad value drops that value, not the whole row.
pub struct FrdReader {
    use_mmap: bool,
}

impl FrdReader {
    pub fn new() -> Self {
        Self { use_mmap: false }
    }

    pub fn with_mmap(use_mmap: bool) -> Self {
        Self { use_mmap }
    }

    /// Read a file into a time-indexed profile
    pub fn read_profile(&self, path: &Path) -> Result<SoundingProfile> {
        let profile = if self.use_mmap {
            self.read_profile_mmap(path)?
        } else {
            self.read_profile_buffered(path)?
        };

        debug!(
            file = %path.display(),
            time_steps = profile.len(),
            "parsed sounding profile"
        );

        Ok(profile)
    }

    /// Read using buffered I/O
    fn read_profile_buffered(&self, path: &Path) -> Result<SoundingProfile> {
        let file = File::open(path)?;
        let reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
        let mut profile = SoundingProfile::new();
        let mut in_data = false;

        for line_result in reader.lines() {
            let line = line_result?;

            if !in_data {
                in_data = self.is_header_line(&line);
                continue;
            }

            if let Some((time, row)) = self.parse_data_line(&line) {
                self.merge_row(&mut profile, time, &row);
            }
        }

        Ok(profile)
    }

    /// Read using memory-mapped I/O for large files
    fn read_profile_mmap(&self, path: &Path) -> Result<SoundingProfile> {
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };
        let content = std::str::from_utf8(&mmap)
            .map_err(|e| CompareError::InvalidFormat(format!("Invalid UTF-8: {}", e)))?;

        let mut profile = SoundingProfile::new();
        let mut in_data = false;

        for line in content.lines() {
            if !in_data {
                in_data = self.is_header_line(line);
                continue;
            }

            if let Some((time, row)) = self.parse_data_line(line) {
                self.merge_row(&mut profile, time, &row);
            }
        }

        Ok(profile)
    }

    /// The column-header line marks the end of the preamble
    fn is_header_line(&self, line: &str) -> bool {
        line.split_whitespace().next() == Some(HEADER_TOKEN)
    }

    /// Parse a single data row into its quantized time and parameter values.
    ///
    /// Returns `None` for anything that is not a data row: too few tokens,
    /// a first token that is not a bare record index, or a time that is not
    /// a finite number. Sentinel, non-finite, and unparseable value tokens
    /// leave that parameter unset.
    fn parse_data_line(&self, line: &str) -> Option<(TimeKey, SoundingRow)> {
        let tokens: Vec<&str> = line.split_whitespace().collect();

        if tokens.len() < MIN_DATA_TOKENS {
            return None;
        }

        if !tokens[0].bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        // A NaN time would quantize to key 0 and mask the real first row
        let seconds: f64 = tokens[1].parse().ok()?;
        if !seconds.is_finite() {
            return None;
        }
        let time = TimeKey::from_seconds(seconds);

        let mut row = SoundingRow::default();
        for parameter in Parameter::ALL {
            // Largest extracted column is 9, covered by the token-count check
            if let Ok(value) = tokens[parameter.column()].parse::<f64>() {
                if value.is_finite()
                    && !approx_eq!(
                        f64,
                        value,
                        SENTINEL_VALUE,
                        epsilon = SENTINEL_TOLERANCE,
                        ulps = 0
                    )
                {
                    row.set(parameter, value);
                }
            }
        }

        Some((time, row))
    }

    /// Merge one row's values into the profile, parameter by parameter, so
    /// a repeated time only overwrites the values the later row carries. A
    /// row with no usable values never creates a time key.
    fn merge_row(&self, profile: &mut SoundingProfile, time: TimeKey, row: &SoundingRow) {
        for parameter in Parameter::ALL {
            if let Some(value) = row.get(parameter) {
                profile.insert(time, parameter, value);
            }
        }
    }
}

impl Default for FrdReader {
    fn default() -> Self {
        Self::new()
    }
}
