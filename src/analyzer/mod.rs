// Analyzer module: indicator series, snapshot extraction and the decision rule.

pub mod decision;
pub mod market_indicators;
pub mod price_analysis;

// Re-export the main Analyzer implementation for ease of use.
pub use price_analysis::{Analyzer, AnalyzerImpl};
