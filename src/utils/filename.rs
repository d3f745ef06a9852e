use chrono::{DateTime, Datelike, Local, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use std::path::PathBuf;

use crate::utils::constants::REPORT_FILE_PREFIX;

lazy_static! {
    /// Reference system names: D{YYYYMMDD}_{HHMMSS}_PQC.<ext>
    static ref AVAPS_PATTERN: Regex = Regex::new(r"^D(\d{8})_(\d{6})_PQC\.").unwrap();
    /// Comparison system flight-date marker: {YYYYMMDD}H1
    static ref ACS_FLIGHT_PATTERN: Regex = Regex::new(r"(\d{8})H1").unwrap();
    /// Comparison system launch marker: -{YYYYMMDD}T{HHMMSS}
    static ref ACS_LAUNCH_PATTERN: Regex = Regex::new(r"-(\d{8})T(\d{6})").unwrap();
}

/// Extract the `YYYYMMDD_HHMMSS` launch timestamp from a reference-system
/// file name, or `None` when the name does not follow the convention.
pub fn extract_avaps_timestamp(filename: &str) -> Option<String> {
    AVAPS_PATTERN
        .captures(filename)
        .map(|caps| format!("{}_{}", &caps[1], &caps[2]))
}

/// Extract the `YYYYMMDD_HHMMSS` launch timestamp from a comparison-system
/// file name. The date comes from the flight marker and the time from the
/// launch marker; both must be present.
pub fn extract_acs_timestamp(filename: &str) -> Option<String> {
    let flight = ACS_FLIGHT_PATTERN.captures(filename)?;
    let launch = ACS_LAUNCH_PATTERN.captures(filename)?;
    Some(format!("{}_{}", &flight[1], &launch[2]))
}

/// Generate the report filename for a run, format:
/// frd-comparison-{YYYYMMDD}-{HHMMSS}.txt. Named after the run's start
/// time so the filename and the report header always agree.
pub fn generate_report_filename(started_at: &DateTime<Local>) -> PathBuf {
    let filename = format!(
        "{}-{:04}{:02}{:02}-{:02}{:02}{:02}.txt",
        REPORT_FILE_PREFIX,
        started_at.year(),
        started_at.month(),
        started_at.day(),
        started_at.hour(),
        started_at.minute(),
        started_at.second()
    );
    PathBuf::from(filename)
}
