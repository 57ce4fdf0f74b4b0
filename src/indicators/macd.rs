use super::moving_average::calculate_ema;
use crate::models::{IndicatorSeries, MacdResult};

/// Pointwise `a - b`, invalid where either side is invalid
pub(crate) fn subtract(a: &IndicatorSeries, b: &IndicatorSeries) -> IndicatorSeries {
    a.iter()
        .zip(b.iter())
        .map(|(a, b)| Some((*a)? - (*b)?))
        .collect()
}

/// Calculate MACD indicator
///
/// MACD = EMA(fast) - EMA(slow)
/// Signal = EMA(signal) of MACD
/// Histogram = MACD - Signal
///
/// All three lines stay indexed 1:1 with `prices`; positions where an
/// underlying EMA is still warming up are invalid.
pub fn calculate_macd(
    prices: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> MacdResult {
    let fast_ema = calculate_ema(prices, fast_period);
    let slow_ema = calculate_ema(prices, slow_period);

    let macd_line = subtract(&fast_ema, &slow_ema);
    let signal_line = calculate_ema(&macd_line, signal_period);
    let histogram = subtract(&macd_line, &signal_line);

    MacdResult {
        macd_line,
        signal_line,
        histogram,
    }
}

/// Calculate MACD with default periods (12, 26, 9)
pub fn calculate_macd_default(prices: &[f64]) -> MacdResult {
    calculate_macd(prices, 12, 26, 9)
}
