use crate::models::{DiffStats, PairComparison, Parameter, PARAMETER_COUNT};

/// Pools per-pair differences into campaign-wide statistics.
///
/// Raw differences are kept and the stats re-derived at the end, so the
/// result is identical to a single pass over the concatenated data.
#[derive(Debug, Default)]
pub struct DifferenceAggregator {
    pooled: [Vec<f64>; PARAMETER_COUNT],
    pairs_compared: usize,
}

impl DifferenceAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accumulate(&mut self, comparison: &PairComparison) {
        for parameter_comparison in &comparison.parameters {
            self.pooled[parameter_comparison.parameter.index()]
                .extend_from_slice(&parameter_comparison.differences);
        }
        self.pairs_compared += 1;
    }

    pub fn pairs_compared(&self) -> usize {
        self.pairs_compared
    }

    /// Campaign-wide stats for every parameter, in canonical order
    pub fn summarize(&self) -> Vec<(Parameter, DiffStats)> {
        Parameter::ALL
            .into_iter()
            .map(|parameter| {
                let differences = &self.pooled[parameter.index()];
                (
                    parameter,
                    DiffStats::from_differences(differences, parameter.threshold()),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParameterComparison;
    use float_cmp::approx_eq;
    use std::path::PathBuf;

    fn pair(temperature_diffs: Vec<f64>) -> PairComparison {
        let parameters = Parameter::ALL
            .into_iter()
            .map(|parameter| {
                let differences = if parameter == Parameter::Temperature {
                    temperature_diffs.clone()
                } else {
                    Vec::new()
                };
                ParameterComparison::new(parameter, differences)
            })
            .collect();

        PairComparison {
            avaps_file: PathBuf::from("a.frd"),
            acs_file: PathBuf::from("b.frd"),
            parameters,
        }
    }

    #[test]
    fn test_accumulate_matches_single_pass() {
        let first = vec![0.1, -0.3, 0.2];
        let second = vec![0.05, 0.4];

        let mut aggregator = DifferenceAggregator::new();
        aggregator.accumulate(&pair(first.clone()));
        aggregator.accumulate(&pair(second.clone()));

        let mut concatenated = first;
        concatenated.extend(second);
        let expected =
            DiffStats::from_differences(&concatenated, Parameter::Temperature.threshold());

        let summary = aggregator.summarize();
        let (parameter, stats) = &summary[Parameter::Temperature.index()];
        assert_eq!(*parameter, Parameter::Temperature);
        assert_eq!(stats.total, expected.total);
        assert!(approx_eq!(f64, stats.mean, expected.mean, epsilon = 1e-12));
        assert!(approx_eq!(
            f64,
            stats.std_dev,
            expected.std_dev,
            epsilon = 1e-12
        ));
        assert_eq!(stats.within_threshold, expected.within_threshold);
        assert_eq!(aggregator.pairs_compared(), 2);
    }

    #[test]
    fn test_empty_aggregator_has_no_data() {
        let aggregator = DifferenceAggregator::new();
        let summary = aggregator.summarize();

        assert_eq!(summary.len(), PARAMETER_COUNT);
        assert!(summary.iter().all(|(_, stats)| !stats.has_data()));
        assert_eq!(aggregator.pairs_compared(), 0);
    }

    #[test]
    fn test_parameters_pool_independently() {
        let mut aggregator = DifferenceAggregator::new();
        aggregator.accumulate(&pair(vec![0.1, 0.1]));

        let summary = aggregator.summarize();
        let (_, temperature) = &summary[Parameter::Temperature.index()];
        let (_, pressure) = &summary[Parameter::Pressure.index()];

        assert_eq!(temperature.total, 2);
        assert_eq!(pressure.total, 0);
    }
}
