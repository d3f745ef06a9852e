/// Marker value used by .frd files for a missing or invalid reading
pub const SENTINEL_VALUE: f64 = -999.0;
/// Absolute tolerance when testing a value against the sentinel
pub const SENTINEL_TOLERANCE: f64 = 0.1;

/// First whitespace token of the column-header line that opens the data section
pub const HEADER_TOKEN: &str = "IX";
/// Minimum number of whitespace tokens for a line to qualify as a data row
pub const MIN_DATA_TOKENS: usize = 10;

/// Scale factor mapping elapsed seconds to the quantized integer time key
/// (two decimal places, quarter-second resolution data)
pub const TIME_KEY_SCALE: f64 = 100.0;

/// Pairing tolerance over the literal HHMMSS digits of two file timestamps
pub const DEFAULT_TOLERANCE: u32 = 1;

/// Report filename prefix: frd-comparison-{YYYYMMDD}-{HHMMSS}.txt
pub const REPORT_FILE_PREFIX: &str = "frd-comparison";

/// Processing defaults
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
