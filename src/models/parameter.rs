use serde::{Deserialize, Serialize};

/// Number of measured parameters extracted from a .frd record
pub const PARAMETER_COUNT: usize = 5;

/// The measured parameters compared between the two instruments.
///
/// The variant order fixes both the comparison order and the display order of
/// every report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Pressure,
    Temperature,
    Humidity,
    WindU,
    WindV,
}

impl Parameter {
    /// All parameters in comparison/display order
    pub const ALL: [Parameter; PARAMETER_COUNT] = [
        Parameter::Pressure,
        Parameter::Temperature,
        Parameter::Humidity,
        Parameter::WindU,
        Parameter::WindV,
    ];

    /// Position within [`Parameter::ALL`], used to index per-parameter arrays
    pub fn index(&self) -> usize {
        match self {
            Parameter::Pressure => 0,
            Parameter::Temperature => 1,
            Parameter::Humidity => 2,
            Parameter::WindU => 3,
            Parameter::WindV => 4,
        }
    }

    /// Zero-based token position of this parameter in a .frd data row.
    ///
    /// Data columns: IX, t (s), P (mb), T (C), RH (%), Z (m), WD, WS (m/s),
    /// U (m/s), V (m/s), ...
    pub fn column(&self) -> usize {
        match self {
            Parameter::Pressure => 2,
            Parameter::Temperature => 3,
            Parameter::Humidity => 4,
            Parameter::WindU => 8,
            Parameter::WindV => 9,
        }
    }

    /// Short symbol used in logs and column labels
    pub fn symbol(&self) -> &'static str {
        match self {
            Parameter::Pressure => "P",
            Parameter::Temperature => "T",
            Parameter::Humidity => "RH",
            Parameter::WindU => "U",
            Parameter::WindV => "V",
        }
    }

    /// Human-readable label used in report sections
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Pressure => "Pressure",
            Parameter::Temperature => "Temperature",
            Parameter::Humidity => "Humidity",
            Parameter::WindU => "U Winds",
            Parameter::WindV => "V Winds",
        }
    }

    /// Display unit
    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Pressure => "mb",
            Parameter::Temperature => "C",
            Parameter::Humidity => "%",
            Parameter::WindU => "m/s",
            Parameter::WindV => "m/s",
        }
    }

    /// Acceptance threshold on the absolute AVAPS - ACS difference
    pub fn threshold(&self) -> f64 {
        match self {
            Parameter::Pressure => 1.0,
            Parameter::Temperature => 0.2,
            Parameter::Humidity => 5.0,
            Parameter::WindU => 1.0,
            Parameter::WindV => 1.0,
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
