use crate::error::{CompareError, Result};
use crate::models::{PairComparison, Parameter, ParameterComparison, SoundingProfile};
use crate::readers::FrdReader;
use std::path::Path;
use tracing::debug;

/// Computes reference-minus-comparison differences at shared time steps.
///
/// Only times present in both profiles take part, and within a shared time
/// only parameters carrying a value on both sides. Differences are always
/// reference minus comparison, in ascending time order.
pub struct DiffAnalyzer {
    reader: FrdReader,
}

impl DiffAnalyzer {
    pub fn new() -> Self {
        Self {
            reader: FrdReader::new(),
        }
    }

    pub fn with_reader(reader: FrdReader) -> Self {
        Self { reader }
    }

    /// Differences for a single parameter across the shared time steps
    pub fn compare_parameter(
        &self,
        avaps: &SoundingProfile,
        acs: &SoundingProfile,
        parameter: Parameter,
    ) -> Vec<f64> {
        avaps
            .common_times(acs)
            .into_iter()
            .filter_map(
                |time| match (avaps.value(time, parameter), acs.value(time, parameter)) {
                    (Some(reference), Some(comparison)) => Some(reference - comparison),
                    _ => None,
                },
            )
            .collect()
    }

    /// Compare two parsed profiles across every parameter. The result
    /// carries all parameters in canonical order, with or without data.
    pub fn compare_profiles(
        &self,
        avaps_file: &Path,
        acs_file: &Path,
        avaps: &SoundingProfile,
        acs: &SoundingProfile,
    ) -> PairComparison {
        let parameters = Parameter::ALL
            .into_iter()
            .map(|parameter| {
                let differences = self.compare_parameter(avaps, acs, parameter);
                debug!(
                    parameter = parameter.symbol(),
                    values = differences.len(),
                    "computed differences"
                );
                ParameterComparison::new(parameter, differences)
            })
            .collect();

        PairComparison {
            avaps_file: avaps_file.to_path_buf(),
            acs_file: acs_file.to_path_buf(),
            parameters,
        }
    }

    /// Read and compare two files.
    ///
    /// A file that parses to an empty profile is rejected. Parsing to
    /// nothing means the wrong file was supplied, not that the instruments
    /// agreed perfectly.
    pub fn compare_files(&self, avaps_file: &Path, acs_file: &Path) -> Result<PairComparison> {
        let avaps = self.reader.read_profile(avaps_file)?;
        if avaps.is_empty() {
            return Err(CompareError::EmptyProfile {
                path: avaps_file.to_path_buf(),
            });
        }

        let acs = self.reader.read_profile(acs_file)?;
        if acs.is_empty() {
            return Err(CompareError::EmptyProfile {
                path: acs_file.to_path_buf(),
            });
        }

        Ok(self.compare_profiles(avaps_file, acs_file, &avaps, &acs))
    }
}

impl Default for DiffAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeKey;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn profile(entries: &[(f64, Parameter, f64)]) -> SoundingProfile {
        let mut profile = SoundingProfile::new();
        for &(secs, parameter, value) in entries {
            profile.insert(TimeKey::from_seconds(secs), parameter, value);
        }
        profile
    }

    #[test]
    fn test_compare_parameter_reference_minus_comparison() {
        let avaps = profile(&[
            (10.00, Parameter::Temperature, 20.0),
            (10.25, Parameter::Temperature, 21.0),
        ]);
        let acs = profile(&[
            (10.00, Parameter::Temperature, 19.5),
            (10.25, Parameter::Temperature, 22.0),
        ]);

        let analyzer = DiffAnalyzer::new();
        let diffs = analyzer.compare_parameter(&avaps, &acs, Parameter::Temperature);
        assert_eq!(diffs, vec![0.5, -1.0]);
    }

    #[test]
    fn test_mean_sign_flips_under_operand_swap() {
        let a = profile(&[
            (10.00, Parameter::Humidity, 70.0),
            (10.25, Parameter::Humidity, 72.0),
            (10.50, Parameter::Humidity, 68.0),
        ]);
        let b = profile(&[
            (10.00, Parameter::Humidity, 71.5),
            (10.25, Parameter::Humidity, 69.0),
            (10.50, Parameter::Humidity, 68.0),
        ]);

        let analyzer = DiffAnalyzer::new();
        let forward = analyzer.compare_parameter(&a, &b, Parameter::Humidity);
        let reversed = analyzer.compare_parameter(&b, &a, Parameter::Humidity);

        let mean = |diffs: &[f64]| diffs.iter().sum::<f64>() / diffs.len() as f64;
        assert!((mean(&forward) + mean(&reversed)).abs() < 1e-12);
    }

    #[test]
    fn test_compare_parameter_skips_one_sided_values() {
        let avaps = profile(&[
            (10.00, Parameter::Pressure, 1000.0),
            (10.25, Parameter::Pressure, 999.0),
            // Shared time but only this side has the parameter
            (10.50, Parameter::Pressure, 998.0),
            // Time not present in the other profile at all
            (99.00, Parameter::Pressure, 900.0),
        ]);
        let acs = profile(&[
            (10.00, Parameter::Pressure, 999.0),
            (10.25, Parameter::Pressure, 999.0),
            (10.50, Parameter::Temperature, 21.0),
        ]);

        let analyzer = DiffAnalyzer::new();
        let diffs = analyzer.compare_parameter(&avaps, &acs, Parameter::Pressure);
        assert_eq!(diffs, vec![1.0, 0.0]);
    }

    #[test]
    fn test_compare_profiles_covers_every_parameter() {
        let avaps = profile(&[(1.0, Parameter::WindU, -3.0)]);
        let acs = profile(&[(1.0, Parameter::WindU, -2.5)]);

        let analyzer = DiffAnalyzer::new();
        let comparison = analyzer.compare_profiles(
            &PathBuf::from("a.frd"),
            &PathBuf::from("b.frd"),
            &avaps,
            &acs,
        );

        assert_eq!(comparison.parameters.len(), Parameter::ALL.len());
        for (slot, parameter) in comparison.parameters.iter().zip(Parameter::ALL) {
            assert_eq!(slot.parameter, parameter);
        }

        let wind_u = comparison.parameter(Parameter::WindU).unwrap();
        assert_eq!(wind_u.differences, vec![-0.5]);
        // No pressure on either side, slot still present
        let pressure = comparison.parameter(Parameter::Pressure).unwrap();
        assert!(!pressure.stats.has_data());
    }

    #[test]
    fn test_compare_files() -> Result<()> {
        let mut avaps_file = NamedTempFile::new()?;
        writeln!(avaps_file, "  IX    Time   Press    Temp    Hum    Alt  GPSAlt  Wspd     U      V")?;
        writeln!(
            avaps_file,
            "   1    0.25  1009.2   24.61   74.2  101.5   98.7   8.6   -3.2    7.9"
        )?;

        let mut acs_file = NamedTempFile::new()?;
        writeln!(acs_file, "  IX    Time   Press    Temp    Hum    Alt  GPSAlt  Wspd     U      V")?;
        writeln!(
            acs_file,
            "   1    0.25  1008.7   24.41   72.2  101.5   98.7   8.6   -3.0    7.4"
        )?;

        let analyzer = DiffAnalyzer::new();
        let comparison = analyzer.compare_files(avaps_file.path(), acs_file.path())?;

        let pressure = comparison.parameter(Parameter::Pressure).unwrap();
        assert_eq!(pressure.stats.total, 1);
        assert!((pressure.differences[0] - 0.5).abs() < 1e-9);

        Ok(())
    }

    #[test]
    fn test_compare_files_rejects_empty_profile() -> Result<()> {
        let mut empty_file = NamedTempFile::new()?;
        writeln!(empty_file, "  IX    Time   Press    Temp    Hum    Alt  GPSAlt  Wspd     U      V")?;

        let mut good_file = NamedTempFile::new()?;
        writeln!(good_file, "  IX    Time   Press    Temp    Hum    Alt  GPSAlt  Wspd     U      V")?;
        writeln!(
            good_file,
            "   1    0.25  1009.2   24.61   74.2  101.5   98.7   8.6   -3.2    7.9"
        )?;

        let analyzer = DiffAnalyzer::new();
        let result = analyzer.compare_files(empty_file.path(), good_file.path());

        assert!(matches!(result, Err(CompareError::EmptyProfile { .. })));

        Ok(())
    }
}
