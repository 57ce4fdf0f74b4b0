use crate::models::IndicatorSeries;

/// RSI from smoothed average gain and loss; 100 when there is no loss
pub(crate) fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// Split a price change into (gain, loss), loss as a positive magnitude
pub(crate) fn split_change(change: f64) -> (f64, f64) {
    if change > 0.0 {
        (change, 0.0)
    } else {
        (0.0, -change)
    }
}

/// One Wilder smoothing step
pub(crate) fn wilder_smooth(average: f64, sample: f64, period: usize) -> f64 {
    (average * (period as f64 - 1.0) + sample) / period as f64
}

/// Calculate Relative Strength Index (RSI) over the whole series
///
/// RSI measures the magnitude of recent price changes to evaluate
/// overbought or oversold conditions.
///
/// Values:
/// - RSI > 70: Overbought
/// - RSI < 30: Oversold
///
/// Positions before `period` are invalid. The first value (at `period`) is
/// seeded from the gains and losses of changes `1..=period`; later values
/// use Wilder's smoothing. Needs more than `period` samples, otherwise the
/// result is all-invalid.
pub fn calculate_rsi(prices: &[f64], period: usize) -> IndicatorSeries {
    let len = prices.len();
    if period == 0 || len <= period {
        tracing::debug!(len, period, "RSI: insufficient data, returning invalid series");
        return IndicatorSeries::invalid(len);
    }

    let mut result = vec![None; len];

    let mut gain_sum = 0.0;
    let mut loss_sum = 0.0;
    for i in 1..=period {
        let (gain, loss) = split_change(prices[i] - prices[i - 1]);
        gain_sum += gain;
        loss_sum += loss;
    }

    let mut avg_gain = gain_sum / period as f64;
    let mut avg_loss = loss_sum / period as f64;
    result[period] = Some(rsi_value(avg_gain, avg_loss));

    for i in period + 1..len {
        let (gain, loss) = split_change(prices[i] - prices[i - 1]);
        avg_gain = wilder_smooth(avg_gain, gain, period);
        avg_loss = wilder_smooth(avg_loss, loss, period);
        result[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    IndicatorSeries::from_values(result)
}
