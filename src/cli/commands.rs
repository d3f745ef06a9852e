use crate::analyzers::DiffAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{CompareError, Result};
use crate::processors::BatchRunner;
use crate::readers::FrdReader;
use crate::utils::filename::generate_report_filename;
use crate::utils::progress::ProgressReporter;
use crate::writers::ReportWriter;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Compare {
            avaps_file,
            acs_file,
            output,
            mmap,
        } => run_compare(&avaps_file, &acs_file, output, mmap),

        Commands::Batch {
            input_dir,
            output,
            tolerance,
            max_workers,
            mmap,
        } => run_batch(&input_dir, output, tolerance, max_workers, mmap),
    }
}

/// Console logging goes to stderr so report text on stdout stays clean;
/// with `--log-file` everything goes to the file instead, without ANSI
/// colour codes.
fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Arc::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}

fn run_compare(
    avaps_file: &Path,
    acs_file: &Path,
    output: Option<PathBuf>,
    mmap: bool,
) -> Result<()> {
    for path in [avaps_file, acs_file] {
        if !path.is_file() {
            return Err(CompareError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    println!("Parsing File 1: {}", file_display_name(avaps_file));
    println!("Parsing File 2: {}", file_display_name(acs_file));

    let analyzer = DiffAnalyzer::with_reader(FrdReader::with_mmap(mmap));
    let comparison = analyzer.compare_files(avaps_file, acs_file)?;

    let writer = ReportWriter::new();
    let results = writer.format_comparison_results(&comparison);
    print!("{}", results);

    if let Some(output_path) = output {
        writer.write_report(&output_path, &results)?;
        println!("Report written to {}", output_path.display());
    }

    Ok(())
}

fn run_batch(
    input_dir: &Path,
    output: Option<PathBuf>,
    tolerance: u32,
    max_workers: usize,
    mmap: bool,
) -> Result<()> {
    println!("Scanning directory: {}", input_dir.display());

    let runner = BatchRunner::new()
        .with_tolerance(tolerance)
        .with_max_workers(max_workers)
        .with_mmap(mmap);

    let progress = ProgressReporter::new(0, "Comparing file pairs...", false);
    let outcome = runner.run(input_dir, Some(&progress))?;
    drop(progress);

    print!("{}", outcome.match_report.summary());
    if !outcome.skipped.is_empty() {
        println!("Skipped {} pair(s) due to unreadable files", outcome.skipped.len());
    }

    let writer = ReportWriter::new();
    let report = writer.format_batch_report(&outcome);

    let output_path = output.unwrap_or_else(|| generate_report_filename(&outcome.started_at));
    writer.write_report(&output_path, &report)?;
    println!("Report written to {}", output_path.display());

    Ok(())
}

fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
