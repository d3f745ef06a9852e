pub mod batch_runner;
pub mod pair_matcher;

pub use batch_runner::{BatchOutcome, BatchRunner, SkippedPair};
pub use pair_matcher::{classify_file, MatchReport, MatchedPair, PairMatcher};
