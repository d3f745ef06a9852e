use crate::analyzers::{DiffAnalyzer, DifferenceAggregator};
use crate::error::{CompareError, Result};
use crate::models::{DiffStats, PairComparison, Parameter, SourceFile};
use crate::processors::pair_matcher::{classify_file, MatchedPair, MatchReport, PairMatcher};
use crate::readers::FrdReader;
use crate::utils::constants::DEFAULT_TOLERANCE;
use crate::utils::progress::ProgressReporter;
use chrono::{DateTime, Local};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// A matched pair that could not be compared, with the reason.
#[derive(Debug, Clone)]
pub struct SkippedPair {
    pub avaps_file: PathBuf,
    pub acs_file: PathBuf,
    pub reason: String,
}

/// Everything one batch run produces.
#[derive(Debug)]
pub struct BatchOutcome {
    pub started_at: DateTime<Local>,
    pub input_dir: PathBuf,
    pub tolerance: u32,
    /// Per-pair results, in pair order
    pub comparisons: Vec<PairComparison>,
    pub skipped: Vec<SkippedPair>,
    pub match_report: MatchReport,
    pub unclassified_files: usize,
    /// Campaign-wide stats pooled over every compared pair
    pub global: Vec<(Parameter, DiffStats)>,
}

/// Scans a directory, pairs its files and compares every pair.
///
/// Pairs are compared on a rayon pool; one unreadable file skips that pair
/// and the run carries on. Aggregation happens sequentially afterwards so
/// results do not depend on worker scheduling.
pub struct BatchRunner {
    tolerance: u32,
    max_workers: usize,
    use_mmap: bool,
}

impl BatchRunner {
    pub fn new() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_workers: num_cpus::get(),
            use_mmap: false,
        }
    }

    pub fn with_tolerance(mut self, tolerance: u32) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    pub fn with_mmap(mut self, use_mmap: bool) -> Self {
        self.use_mmap = use_mmap;
        self
    }

    /// Scan a directory (non-recursive) and classify every regular file.
    /// Returns the classified files and the count of names matching
    /// neither convention.
    pub fn discover_files(&self, input_dir: &Path) -> Result<(Vec<SourceFile>, usize)> {
        if !input_dir.is_dir() {
            return Err(CompareError::InputNotFound {
                path: input_dir.to_path_buf(),
            });
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(input_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut classified = Vec::new();
        let mut unclassified = 0;
        for path in paths {
            match classify_file(&path) {
                Some(file) => classified.push(file),
                None => unclassified += 1,
            }
        }

        Ok((classified, unclassified))
    }

    pub fn run(
        &self,
        input_dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<BatchOutcome> {
        let started_at = Local::now();
        let (files, unclassified_files) = self.discover_files(input_dir)?;

        info!(
            directory = %input_dir.display(),
            classified = files.len(),
            unclassified = unclassified_files,
            "scanned input directory"
        );

        let matcher = PairMatcher::with_tolerance(self.tolerance);
        let match_report = matcher.match_files(files);

        if let Some(p) = progress {
            p.set_length(match_report.pairs.len() as u64);
        }

        let compared_count = Arc::new(AtomicUsize::new(0));

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| CompareError::Config(e.to_string()))?;

        // Compare pairs in parallel; collect keeps the pair order
        let results: Vec<std::result::Result<PairComparison, SkippedPair>> = pool.install(|| {
            match_report
                .pairs
                .par_iter()
                .map(|pair| {
                    let result = self.compare_pair(pair);

                    let count = compared_count.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    result
                })
                .collect()
        });

        let mut comparisons = Vec::new();
        let mut skipped = Vec::new();
        for result in results {
            match result {
                Ok(comparison) => comparisons.push(comparison),
                Err(skip) => skipped.push(skip),
            }
        }

        let mut aggregator = DifferenceAggregator::new();
        for comparison in &comparisons {
            aggregator.accumulate(comparison);
        }
        let global = aggregator.summarize();

        if let Some(p) = progress {
            p.finish_with_message(&format!("Compared {} pair(s)", comparisons.len()));
        }

        Ok(BatchOutcome {
            started_at,
            input_dir: input_dir.to_path_buf(),
            tolerance: self.tolerance,
            comparisons,
            skipped,
            match_report,
            unclassified_files,
            global,
        })
    }

    /// One pair in isolation, so a bad file skips the pair instead of
    /// ending the whole run
    fn compare_pair(
        &self,
        pair: &MatchedPair,
    ) -> std::result::Result<PairComparison, SkippedPair> {
        let analyzer = DiffAnalyzer::with_reader(FrdReader::with_mmap(self.use_mmap));
        analyzer
            .compare_files(&pair.avaps.path, &pair.acs.path)
            .map_err(|e| {
                warn!(
                    avaps = %pair.avaps.file_name(),
                    acs = %pair.acs.file_name(),
                    error = %e,
                    "skipping pair"
                );
                SkippedPair {
                    avaps_file: pair.avaps.path.clone(),
                    acs_file: pair.acs.path.clone(),
                    reason: e.to_string(),
                }
            })
    }
}

impl Default for BatchRunner {
    fn default() -> Self {
        Self::new()
    }
}
