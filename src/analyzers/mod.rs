pub mod aggregator;
pub mod diff_analyzer;

pub use aggregator::DifferenceAggregator;
pub use diff_analyzer::DiffAnalyzer;
