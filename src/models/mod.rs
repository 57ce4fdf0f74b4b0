use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A sample that may or may not carry a computable value.
///
/// Raw price series are always valid; indicator series carry `None`
/// during warm-up. Moving averages accept either, which lets MACD and
/// KDJ smooth an indicator series with the same code that smooths prices.
pub trait SeriesValue: Copy {
    fn value(self) -> Option<f64>;
}

impl SeriesValue for f64 {
    fn value(self) -> Option<f64> {
        Some(self)
    }
}

impl SeriesValue for Option<f64> {
    fn value(self) -> Option<f64> {
        self
    }
}

/// Derived series aligned 1:1 with its source.
///
/// `None` marks positions with no computable value yet, so a genuine
/// zero is never confused with warm-up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorSeries(Vec<Option<f64>>);

impl IndicatorSeries {
    /// All-invalid series of the given length
    pub fn invalid(len: usize) -> Self {
        Self(vec![None; len])
    }

    pub fn from_values(values: Vec<Option<f64>>) -> Self {
        Self(values)
    }

    /// Value at `index`, or None if out of range or invalid
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied().flatten()
    }

    pub fn is_valid(&self, index: usize) -> bool {
        self.value_at(index).is_some()
    }

    pub fn first_valid_index(&self) -> Option<usize> {
        self.0.iter().position(Option::is_some)
    }

    /// Most recent valid position as `(index, value)`
    pub fn last_valid(&self) -> Option<(usize, f64)> {
        self.0
            .iter()
            .enumerate()
            .rev()
            .find_map(|(i, v)| v.map(|v| (i, v)))
    }

    pub fn valid_count(&self) -> usize {
        self.0.iter().filter(|v| v.is_some()).count()
    }

    pub fn into_inner(self) -> Vec<Option<f64>> {
        self.0
    }
}

impl Deref for IndicatorSeries {
    type Target = [Option<f64>];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<Option<f64>> for IndicatorSeries {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// OHLCV candlestick data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

pub fn closes(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.close).collect()
}

pub fn highs(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.high).collect()
}

pub fn lows(candles: &[Candle]) -> Vec<f64> {
    candles.iter().map(|c| c.low).collect()
}

/// Date labels (`YYYY-MM-DD`) for cross events
pub fn timestamp_labels(candles: &[Candle]) -> Vec<String> {
    candles
        .iter()
        .map(|c| c.timestamp.format("%Y-%m-%d").to_string())
        .collect()
}

/// MACD line, signal line and histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacdResult {
    pub macd_line: IndicatorSeries,
    pub signal_line: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

/// Stochastic %K, %D and %J lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KdjResult {
    pub k: IndicatorSeries,
    pub d: IndicatorSeries,
    pub j: IndicatorSeries,
}

impl KdjResult {
    pub(crate) fn invalid(len: usize) -> Self {
        Self {
            k: IndicatorSeries::invalid(len),
            d: IndicatorSeries::invalid(len),
            j: IndicatorSeries::invalid(len),
        }
    }
}

/// Classification of one index of a short/long moving-average pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CrossKind {
    #[default]
    NoCross,
    GoldenCross, // short crosses above long
    DeathCross,  // short crosses below long
}

impl CrossKind {
    pub fn is_cross(self) -> bool {
        self != CrossKind::NoCross
    }
}

impl fmt::Display for CrossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossKind::NoCross => write!(f, "no cross"),
            CrossKind::GoldenCross => write!(f, "golden cross"),
            CrossKind::DeathCross => write!(f, "death cross"),
        }
    }
}

/// One classified index where both averages were valid at `index` and `index - 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossEvent {
    pub index: usize,
    pub label: String,
    pub price: f64,
    pub short_value: f64,
    pub long_value: f64,
    pub kind: CrossKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendState {
    Bullish,
    Bearish,
    Indeterminate,
}

impl fmt::Display for TrendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendState::Bullish => write!(f, "bullish"),
            TrendState::Bearish => write!(f, "bearish"),
            TrendState::Indeterminate => write!(f, "indeterminate"),
        }
    }
}

/// Tally of cross kinds over an event sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossStatistics {
    pub golden_crosses: usize,
    pub death_crosses: usize,
    pub no_crosses: usize,
}

impl CrossStatistics {
    pub fn total(&self) -> usize {
        self.golden_crosses + self.death_crosses + self.no_crosses
    }
}
