use crate::models::{Instrument, SourceFile, Timestamp};
use crate::utils::constants::DEFAULT_TOLERANCE;
use crate::utils::filename::{extract_acs_timestamp, extract_avaps_timestamp};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Classify a file by its name and recover the launch timestamp.
///
/// Reference-system names are checked first; a name matching neither
/// convention yields `None` and takes no part in matching.
pub fn classify_file(path: &Path) -> Option<SourceFile> {
    let filename = path.file_name()?.to_str()?;

    let (instrument, raw) = if let Some(raw) = extract_avaps_timestamp(filename) {
        (Instrument::Avaps, raw)
    } else if let Some(raw) = extract_acs_timestamp(filename) {
        (Instrument::Acs, raw)
    } else {
        return None;
    };

    match Timestamp::parse(&raw) {
        Ok(timestamp) => Some(SourceFile::new(path.to_path_buf(), instrument, timestamp)),
        Err(_) => {
            warn!(file = filename, "timestamp in filename did not parse");
            None
        }
    }
}

/// A reference file paired with its comparison-system counterpart.
#[derive(Debug, Clone)]
pub struct MatchedPair {
    pub avaps: SourceFile,
    pub acs: SourceFile,
    /// Base-10 HHMMSS distance between the two launch times
    pub time_distance: i64,
}

/// Outcome of matching one directory's worth of classified files.
#[derive(Debug, Default)]
pub struct MatchReport {
    pub pairs: Vec<MatchedPair>,
    pub unmatched_avaps: Vec<SourceFile>,
    pub unmatched_acs: Vec<SourceFile>,
    /// Pairs suppressed because their unordered path pair was already used
    pub suppressed_duplicates: usize,
}

impl MatchReport {
    pub fn summary(&self) -> String {
        let mut summary = String::new();
        summary.push_str(&format!("Matched {} file pair(s)\n", self.pairs.len()));

        if !self.unmatched_acs.is_empty() {
            summary.push_str(&format!(
                "  ACS files without a partner: {}\n",
                self.unmatched_acs.len()
            ));
        }
        if !self.unmatched_avaps.is_empty() {
            summary.push_str(&format!(
                "  AVAPS files without a partner: {}\n",
                self.unmatched_avaps.len()
            ));
        }
        if self.suppressed_duplicates > 0 {
            summary.push_str(&format!(
                "  Duplicate pairings suppressed: {}\n",
                self.suppressed_duplicates
            ));
        }

        summary
    }
}

/// Pairs comparison-system files with reference files by launch timestamp.
///
/// Each ACS file searches the AVAPS files launched on the same date whose
/// HHMMSS field differs by at most the tolerance, taken as a literal
/// base-10 difference. The nearest candidate wins; distance ties fall back
/// to timestamp order and then path order, so repeated runs over the same
/// directory always produce the same pairing. An unordered path pair is
/// never used twice.
pub struct PairMatcher {
    tolerance: i64,
}

impl PairMatcher {
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    pub fn with_tolerance(tolerance: u32) -> Self {
        Self {
            tolerance: tolerance as i64,
        }
    }

    pub fn match_files(&self, files: Vec<SourceFile>) -> MatchReport {
        let mut avaps_files = Vec::new();
        let mut acs_files = Vec::new();
        for file in files {
            match file.instrument {
                Instrument::Avaps => avaps_files.push(file),
                Instrument::Acs => acs_files.push(file),
            }
        }

        // Stable order regardless of directory enumeration order
        avaps_files.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.path.cmp(&b.path)));
        acs_files.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.path.cmp(&b.path)));

        let mut report = MatchReport::default();
        let mut seen_pairs: HashSet<(PathBuf, PathBuf)> = HashSet::new();
        let mut matched_avaps: HashSet<PathBuf> = HashSet::new();

        for acs in acs_files {
            let best = avaps_files
                .iter()
                .filter_map(|avaps| {
                    acs.timestamp
                        .distance(&avaps.timestamp)
                        .filter(|distance| *distance <= self.tolerance)
                        .map(|distance| (distance, avaps))
                })
                .min_by(|(da, a), (db, b)| {
                    da.cmp(db)
                        .then_with(|| a.timestamp.cmp(&b.timestamp))
                        .then_with(|| a.path.cmp(&b.path))
                });

            match best {
                Some((time_distance, avaps)) => {
                    if !seen_pairs.insert(pair_key(&avaps.path, &acs.path)) {
                        report.suppressed_duplicates += 1;
                        continue;
                    }
                    debug!(
                        avaps = %avaps.file_name(),
                        acs = %acs.file_name(),
                        time_distance,
                        "matched pair"
                    );
                    matched_avaps.insert(avaps.path.clone());
                    report.pairs.push(MatchedPair {
                        avaps: avaps.clone(),
                        acs,
                        time_distance,
                    });
                }
                None => {
                    warn!(
                        file = %acs.file_name(),
                        timestamp = %acs.timestamp,
                        "no reference file within tolerance"
                    );
                    report.unmatched_acs.push(acs);
                }
            }
        }

        report.unmatched_avaps = avaps_files
            .into_iter()
            .filter(|avaps| !matched_avaps.contains(&avaps.path))
            .collect();

        report
    }
}

impl Default for PairMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Order-independent identity of a pair
fn pair_key(a: &Path, b: &Path) -> (PathBuf, PathBuf) {
    if a <= b {
        (a.to_path_buf(), b.to_path_buf())
    } else {
        (b.to_path_buf(), a.to_path_buf())
    }
}
