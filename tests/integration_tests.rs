use frd_compare::analyzers::DiffAnalyzer;
use frd_compare::models::Parameter;
use frd_compare::processors::BatchRunner;
use frd_compare::writers::ReportWriter;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const HEADER: &str = "  IX    Time   Press    Temp    Hum    Alt  GPSAlt  Wspd     U      V";

fn write_frd(dir: &Path, name: &str, data_rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::from(" Sounding data export\n Launch: see filename\n");
    content.push_str(HEADER);
    content.push('\n');
    content.push_str("         sec     mb       C      %      m      m    m/s    m/s    m/s\n");
    for row in data_rows {
        content.push_str(row);
        content.push('\n');
    }
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}

#[test]
fn test_compare_two_files_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    // Pressure-only profiles with a known difference pattern
    let avaps = write_frd(
        temp_dir.path(),
        "D20230101_120000_PQC.frd",
        &[
            "   1   10.00  1000.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0",
            "   2   10.25   999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0",
        ],
    );
    let acs = write_frd(
        temp_dir.path(),
        "HX_Melissa-20230101H1-15-20230101T120000-2QC.frd",
        &[
            "   1   10.00   999.5  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0",
            "   2   10.25  1000.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0",
        ],
    );

    let analyzer = DiffAnalyzer::new();
    let comparison = analyzer.compare_files(&avaps, &acs).unwrap();

    let pressure = comparison.parameter(Parameter::Pressure).unwrap();
    assert_eq!(pressure.stats.total, 2);
    assert_eq!(pressure.differences, vec![0.5, -1.0]);
    assert!((pressure.stats.mean - (-0.25)).abs() < 1e-9);
    assert_eq!(pressure.stats.min, -1.0);
    assert_eq!(pressure.stats.max, 0.5);
    assert_eq!(pressure.stats.within_threshold, 2);

    let output = ReportWriter::new().format_comparison_results(&comparison);
    assert!(output.contains("==================== Comparison Results ===================="));
    assert!(output.contains("Comparing: D20230101_120000_PQC.frd - HX_Melissa-20230101H1-15-20230101T120000-2QC.frd"));
    assert!(output.contains("  Mean difference         : -0.2500"));
    assert!(output.contains("  Min/Max difference      : -1.0000 / 0.5000"));
    assert!(output.contains("  Within threshold        : 2 (100.00%)"));
    // No temperature on either side: section still present, with unit
    assert!(output.contains("AVAPS - ACS Temperature (C):"));
}

#[test]
fn test_batch_run_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    // First pair: exact timestamp match
    write_frd(
        temp_dir.path(),
        "D20230101_120000_PQC.frd",
        &[
            "   1   10.00  1000.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0",
            "   2   10.25   999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0",
        ],
    );
    write_frd(
        temp_dir.path(),
        "HX_Melissa-20230101H1-15-20230101T120000-2QC.frd",
        &[
            "   1   10.00   999.5  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0",
            "   2   10.25  1000.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0  -999.0",
        ],
    );

    // Second pair: one second apart, full rows
    write_frd(
        temp_dir.path(),
        "D20230101_130000_PQC.frd",
        &["   1    0.25  1009.2   24.61   74.2  101.5   98.7   8.6   -3.2    7.9"],
    );
    write_frd(
        temp_dir.path(),
        "HX_Melissa-20230101H1-15-20230101T130001-2QC.frd",
        &["   1    0.25  1008.7   24.41   72.2  101.5   98.7   8.6   -3.0    7.4"],
    );

    // A comparison file with no reference launch near it
    write_frd(
        temp_dir.path(),
        "HX_Melissa-20230101H1-15-20230101T235900-2QC.frd",
        &["   1    0.25  1000.0   20.00   50.0  101.5   98.7   8.6   -1.0    1.0"],
    );

    // And a file neither scheme recognises
    std::fs::write(temp_dir.path().join("readme.txt"), "flight notes").unwrap();

    let runner = BatchRunner::new().with_tolerance(1).with_max_workers(2);
    let outcome = runner.run(temp_dir.path(), None).unwrap();

    assert_eq!(outcome.comparisons.len(), 2);
    assert!(outcome.skipped.is_empty());
    assert_eq!(outcome.match_report.unmatched_acs.len(), 1);
    assert_eq!(outcome.unclassified_files, 1);

    // Pooled pressure differences: [0.5, -1.0] from pair one, [0.5] from pair two
    let (_, pressure) = &outcome.global[Parameter::Pressure.index()];
    assert_eq!(pressure.total, 3);
    assert_eq!(pressure.min, -1.0);
    assert_eq!(pressure.max, 0.5);

    let writer = ReportWriter::new();
    let report = writer.format_batch_report(&outcome);
    assert!(report.starts_with("FRD Comparison Report\n"));
    assert!(report.contains("Matched 2 file pair(s)"));
    assert!(report.contains("ACS files without a partner: 1"));
    assert!(report.contains("Files matching neither naming scheme: 1"));
    assert!(report.contains("Unmatched ACS files: 1"));
    assert!(report.contains(
        "  HX_Melissa-20230101H1-15-20230101T235900-2QC.frd (launch 20230101_235900): \
         no reference file within tolerance\n"
    ));
    assert!(report.contains("Global Summary (2 pair(s))"));

    let report_path = temp_dir.path().join("reports").join("run.txt");
    writer.write_report(&report_path, &report).unwrap();
    assert_eq!(std::fs::read_to_string(&report_path).unwrap(), report);
}

#[test]
fn test_batch_report_lists_skipped_pairs() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");

    write_frd(
        temp_dir.path(),
        "D20230101_120000_PQC.frd",
        &["   1    0.25  1009.2   24.61   74.2  101.5   98.7   8.6   -3.2    7.9"],
    );
    // Header but no data rows: parses to an empty profile
    write_frd(
        temp_dir.path(),
        "HX_Melissa-20230101H1-15-20230101T120000-2QC.frd",
        &[],
    );

    let runner = BatchRunner::new().with_tolerance(1).with_max_workers(1);
    let outcome = runner.run(temp_dir.path(), None).unwrap();

    assert!(outcome.comparisons.is_empty());
    assert_eq!(outcome.skipped.len(), 1);

    let report = ReportWriter::new().format_batch_report(&outcome);
    assert!(report.contains("Skipped pairs: 1"));
    assert!(report.contains("No usable data rows"));
    // Nothing compared, so no pooled section
    assert!(!report.contains("Global Summary"));
}
