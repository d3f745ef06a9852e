use crate::error::Result;
use crate::models::{DiffStats, PairComparison, Parameter, ParameterComparison};
use crate::processors::BatchOutcome;
use std::path::Path;

/// Formats comparison results as plain text and writes report files.
///
/// The per-parameter block layout is fixed; downstream tooling parses
/// these reports, so the spacing and wording must not drift. The unit
/// appears in the section header only when there was nothing to compare.
pub struct ReportWriter;

impl ReportWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn format_parameter(&self, comparison: &ParameterComparison) -> String {
        self.format_parameter_stats(comparison.parameter, &comparison.stats)
    }

    pub fn format_parameter_stats(&self, parameter: Parameter, stats: &DiffStats) -> String {
        if !stats.has_data() {
            return format!(
                "\nAVAPS - ACS {} ({}):\n  No comparable data points found.\n",
                parameter.label(),
                parameter.unit()
            );
        }

        let mut output = format!("\nAVAPS - ACS {}:\n", parameter.label());
        output.push_str(&format!("  Total values            : {}\n", stats.total));
        output.push_str(&format!("  Mean difference         : {:.4}\n", stats.mean));
        output.push_str(&format!(
            "  Min/Max difference      : {:.4} / {:.4}\n",
            stats.min, stats.max
        ));
        output.push_str(&format!("  Std dev                 : {:.4}\n", stats.std_dev));
        output.push_str(&format!(
            "  Within threshold        : {} ({:.2}%)\n",
            stats.within_threshold, stats.percent_within
        ));

        output
    }

    /// One pair's section: the file names, a rule, and every parameter
    /// block in canonical order
    pub fn format_pair(&self, comparison: &PairComparison) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "Comparing: {} - {}\n",
            basename(&comparison.avaps_file),
            basename(&comparison.acs_file)
        ));
        output.push_str(&format!("{}\n", "-".repeat(58)));

        for parameter_comparison in &comparison.parameters {
            output.push_str(&self.format_parameter(parameter_comparison));
            output.push('\n');
        }

        output
    }

    /// The direct two-file output, banners included
    pub fn format_comparison_results(&self, comparison: &PairComparison) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n{} Comparison Results {}\n",
            "=".repeat(20),
            "=".repeat(20)
        ));
        output.push_str(&self.format_pair(comparison));
        output.push_str(&format!("{}\n", "=".repeat(58)));
        output
    }

    /// Campaign-wide section over the pooled differences
    pub fn format_global(&self, global: &[(Parameter, DiffStats)], pairs_compared: usize) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "\n{} Global Summary ({} pair(s)) {}\n",
            "=".repeat(20),
            pairs_compared,
            "=".repeat(20)
        ));
        output.push_str(&format!("{}\n", "-".repeat(58)));

        for (parameter, stats) in global {
            output.push_str(&self.format_parameter_stats(*parameter, stats));
            output.push('\n');
        }

        output.push_str(&format!("{}\n", "=".repeat(58)));
        output
    }

    /// The full batch report: run header, match accounting with unmatched
    /// files listed by name, per-pair sections, skipped pairs, then the
    /// global summary (only when at least one pair was compared).
    pub fn format_batch_report(&self, outcome: &BatchOutcome) -> String {
        let mut report = String::new();

        report.push_str("FRD Comparison Report\n");
        report.push_str(&format!(
            "Generated: {}\n",
            outcome.started_at.format("%Y-%m-%d %H:%M:%S")
        ));
        report.push_str(&format!(
            "Input directory: {}\n",
            outcome.input_dir.display()
        ));
        report.push_str(&format!("Timestamp tolerance: {}\n", outcome.tolerance));
        report.push_str(&format!("{}\n", "=".repeat(58)));
        report.push('\n');

        report.push_str(&outcome.match_report.summary());
        if outcome.unclassified_files > 0 {
            report.push_str(&format!(
                "  Files matching neither naming scheme: {}\n",
                outcome.unclassified_files
            ));
        }

        if !outcome.match_report.unmatched_acs.is_empty() {
            report.push_str(&format!(
                "\nUnmatched ACS files: {}\n",
                outcome.match_report.unmatched_acs.len()
            ));
            for file in &outcome.match_report.unmatched_acs {
                report.push_str(&format!(
                    "  {} (launch {}): no reference file within tolerance\n",
                    file.file_name(),
                    file.timestamp
                ));
            }
        }

        for comparison in &outcome.comparisons {
            report.push('\n');
            report.push_str(&self.format_pair(comparison));
        }

        if !outcome.skipped.is_empty() {
            report.push_str(&format!("\nSkipped pairs: {}\n", outcome.skipped.len()));
            for skip in &outcome.skipped {
                report.push_str(&format!(
                    "  {} - {}: {}\n",
                    basename(&skip.avaps_file),
                    basename(&skip.acs_file),
                    skip.reason
                ));
            }
        }

        if !outcome.comparisons.is_empty() {
            report.push_str(&self.format_global(&outcome.global, outcome.comparisons.len()));
        }

        report
    }

    pub fn write_report(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, contents)?;
        Ok(())
    }
}

impl Default for ReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
