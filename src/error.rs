use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompareError>;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("No usable data rows in {}", path.display())]
    EmptyProfile { path: PathBuf },

    #[error("Invalid timestamp '{0}': expected YYYYMMDD_HHMMSS")]
    InvalidTimestamp(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
