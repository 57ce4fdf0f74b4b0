// Signal module: moving-average cross detection and its summaries
pub mod aggregate;
pub mod analyzer;
pub mod cross;

pub use aggregate::{cross_statistics, current_trend, find_crosses_by_kind, recent_crosses, tally_kinds};
pub use analyzer::{analyze_candles, CrossReport, MaCrossAnalyzer, TechnicalReport};
pub use cross::{
    analyze_crosses, analyze_crosses_strict, classify_cross, cross_events, detect_crosses,
    detect_crosses_strict, detect_crosses_with_prices, ma_divergence,
};
