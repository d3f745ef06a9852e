use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::models::parameter::Parameter;

/// Summary statistics over one parameter's reference-minus-comparison
/// differences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiffStats {
    pub total: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation (divisor `n`, not `n - 1`)
    pub std_dev: f64,
    pub within_threshold: usize,
    pub percent_within: f64,
}

impl DiffStats {
    /// Computes stats over a slice of differences against an absolute
    /// agreement threshold. An empty slice yields NaN moments with
    /// `total == 0`; callers check [`DiffStats::has_data`] before
    /// formatting.
    pub fn from_differences(differences: &[f64], threshold: f64) -> Self {
        let total = differences.len();
        if total == 0 {
            return Self {
                total: 0,
                mean: f64::NAN,
                min: f64::NAN,
                max: f64::NAN,
                std_dev: f64::NAN,
                within_threshold: 0,
                percent_within: 0.0,
            };
        }

        let n = total as f64;
        let mean = differences.iter().sum::<f64>() / n;
        let min = differences.iter().copied().fold(f64::INFINITY, f64::min);
        let max = differences
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let variance = differences
            .iter()
            .map(|d| {
                let dev = d - mean;
                dev * dev
            })
            .sum::<f64>()
            / n;
        let within_threshold = differences
            .iter()
            .filter(|d| d.abs() <= threshold)
            .count();

        Self {
            total,
            mean,
            min,
            max,
            std_dev: variance.sqrt(),
            within_threshold,
            percent_within: within_threshold as f64 / n * 100.0,
        }
    }

    pub fn has_data(&self) -> bool {
        self.total > 0
    }
}

/// One parameter's comparison outcome for a file pair. The raw differences
/// are kept so batch aggregation can pool them across pairs.
#[derive(Debug, Clone)]
pub struct ParameterComparison {
    pub parameter: Parameter,
    pub stats: DiffStats,
    pub differences: Vec<f64>,
}

impl ParameterComparison {
    pub fn new(parameter: Parameter, differences: Vec<f64>) -> Self {
        let stats = DiffStats::from_differences(&differences, parameter.threshold());
        Self {
            parameter,
            stats,
            differences,
        }
    }
}

/// Full comparison of one reference/comparison file pair. Every parameter
/// appears exactly once, in canonical order, whether or not it had
/// comparable data.
#[derive(Debug, Clone)]
pub struct PairComparison {
    pub avaps_file: PathBuf,
    pub acs_file: PathBuf,
    pub parameters: Vec<ParameterComparison>,
}

impl PairComparison {
    pub fn parameter(&self, parameter: Parameter) -> Option<&ParameterComparison> {
        self.parameters.iter().find(|p| p.parameter == parameter)
    }
}
