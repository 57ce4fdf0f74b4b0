use super::validation::has_sufficient_data;
use crate::models::{IndicatorSeries, SeriesValue};

/// Arithmetic mean of a window, summed front to back
///
/// Shared by the batch and streaming averages so both round identically.
pub(crate) fn window_mean<I: IntoIterator<Item = f64>>(window: I, period: usize) -> f64 {
    let mut sum = 0.0;
    for value in window {
        sum += value;
    }
    sum / period as f64
}

/// One EMA step with multiplier `k = 2 / (period + 1)`
pub(crate) fn ema_step(sample: f64, previous: f64, k: f64) -> f64 {
    k * sample + (1.0 - k) * previous
}

pub(crate) fn ema_multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Calculate Simple Moving Average (SMA) over the whole series
///
/// Position `i` holds the mean of `series[i + 1 - period..=i]`. Positions
/// before `period - 1`, and windows containing an invalid sample, are invalid.
/// A zero period or a series shorter than `period` yields an all-invalid
/// series of the same length.
pub fn calculate_sma<T: SeriesValue>(series: &[T], period: usize) -> IndicatorSeries {
    let len = series.len();
    if !has_sufficient_data(len, period) {
        tracing::debug!(len, period, "SMA: insufficient data, returning invalid series");
        return IndicatorSeries::invalid(len);
    }

    (0..len)
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let window = &series[i + 1 - period..=i];
            let values: Option<Vec<f64>> = window.iter().map(|s| s.value()).collect();
            values.map(|v| window_mean(v, period))
        })
        .collect()
}

/// Calculate Exponential Moving Average (EMA) over the whole series
///
/// The first valid EMA equals the first valid SMA at the same index; after
/// that each value is `k * sample + (1 - k) * previous`. If the previous EMA
/// is invalid the position is seeded from the raw sample, and an invalid
/// sample leaves its position invalid.
pub fn calculate_ema<T: SeriesValue>(series: &[T], period: usize) -> IndicatorSeries {
    let len = series.len();
    if len == 0 || period == 0 {
        tracing::debug!(len, period, "EMA: degenerate input, returning invalid series");
        return IndicatorSeries::invalid(len);
    }

    let sma = calculate_sma(series, period);
    let Some(start) = sma.first_valid_index() else {
        return IndicatorSeries::invalid(len);
    };

    let k = ema_multiplier(period);
    let mut result = vec![None; len];
    result[start] = sma.value_at(start);

    for i in start + 1..len {
        result[i] = match (series[i].value(), result[i - 1]) {
            (Some(sample), Some(previous)) => Some(ema_step(sample, previous, k)),
            (Some(sample), None) => Some(sample),
            (None, _) => None,
        };
    }

    IndicatorSeries::from_values(result)
}
