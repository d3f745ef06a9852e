pub mod comparison;
pub mod parameter;
pub mod profile;
pub mod source_file;

pub use comparison::{DiffStats, PairComparison, ParameterComparison};
pub use parameter::{Parameter, PARAMETER_COUNT};
pub use profile::{SoundingProfile, SoundingRow, TimeKey};
pub use source_file::{Instrument, SourceFile, Timestamp};
