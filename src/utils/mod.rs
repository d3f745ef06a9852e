pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{
    extract_acs_timestamp, extract_avaps_timestamp, generate_report_filename,
};
pub use progress::ProgressReporter;
