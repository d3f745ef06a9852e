use crate::utils::constants::DEFAULT_TOLERANCE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "frd-compare")]
#[command(about = "Compares dropsonde .frd recordings against a reference system")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare one reference file against one comparison file
    Compare {
        #[arg(help = "Reference (AVAPS) .frd file")]
        avaps_file: PathBuf,

        #[arg(help = "Comparison (ACS) .frd file")]
        acs_file: PathBuf,

        #[arg(short, long, help = "Also write the results to a report file")]
        output: Option<PathBuf>,

        #[arg(long, help = "Use memory-mapped file reading")]
        mmap: bool,
    },

    /// Match and compare every file pair in a directory
    Batch {
        #[arg(short, long, help = "Directory containing .frd files from both systems")]
        input_dir: PathBuf,

        #[arg(
            short,
            long,
            help = "Report file path [default: frd-comparison-{YYYYMMDD}-{HHMMSS}.txt]"
        )]
        output: Option<PathBuf>,

        #[arg(
            long,
            default_value_t = DEFAULT_TOLERANCE,
            help = "Launch-time matching tolerance in seconds"
        )]
        tolerance: u32,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, help = "Use memory-mapped file reading")]
        mmap: bool,
    },
}
