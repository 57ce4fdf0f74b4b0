//! Stochastic oscillator (KDJ)
//!
//! %K places the close inside the high/low range of the trailing window:
//! - %K near 100: closing at the top of the range
//! - %K near 0: closing at the bottom of the range
//!
//! %D smooths %K with an SMA and %J = 3K - 2D exaggerates their spread.

use super::moving_average::calculate_sma;
use super::validation::{ensure_aligned, ensure_period, ensure_sufficient, is_aligned};
use crate::error::IndicatorError;
use crate::models::{IndicatorSeries, KdjResult};

/// %K for one window; 50 when the range is flat
pub(crate) fn percent_k(close: f64, highest_high: f64, lowest_low: f64) -> f64 {
    let range = highest_high - lowest_low;
    if range != 0.0 {
        (close - lowest_low) / range * 100.0
    } else {
        50.0
    }
}

pub(crate) fn percent_j(k: f64, d: f64) -> f64 {
    3.0 * k - 2.0 * d
}

/// Calculate KDJ over aligned high/low/close series
///
/// Mismatched lengths, a zero period, or a series no longer than `period`
/// yield all-invalid lines (sized to `close`). %K is valid from
/// `period - 1`; %D and %J once `signal_period` consecutive %K values exist.
pub fn calculate_kdj(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    signal_period: usize,
) -> KdjResult {
    let len = close.len();
    if !is_aligned(&[high, low, close]) || period == 0 || high.len() <= period {
        tracing::debug!(
            high = high.len(),
            low = low.len(),
            close = len,
            period,
            "KDJ: degenerate input, returning invalid series"
        );
        return KdjResult::invalid(len);
    }

    let k: IndicatorSeries = (0..len)
        .map(|i| {
            if i + 1 < period {
                return None;
            }
            let start = i + 1 - period;
            let highest_high = high[start..=i].iter().copied().fold(f64::MIN, f64::max);
            let lowest_low = low[start..=i].iter().copied().fold(f64::MAX, f64::min);
            Some(percent_k(close[i], highest_high, lowest_low))
        })
        .collect();

    let d = calculate_sma(&k, signal_period);

    let j = k
        .iter()
        .zip(d.iter())
        .map(|(k, d)| Some(percent_j((*k)?, (*d)?)))
        .collect();

    KdjResult { k, d, j }
}

/// Strict variant of [`calculate_kdj`] that reports degenerate input
pub fn calculate_kdj_strict(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    signal_period: usize,
) -> Result<KdjResult, IndicatorError> {
    ensure_aligned(&[high, low, close])?;
    ensure_sufficient(high.len(), period, period + 1)?;
    ensure_period(signal_period)?;

    Ok(calculate_kdj(high, low, close, period, signal_period))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kdj_hand_computed() {
        let high = vec![10.0, 11.0, 12.0, 13.0, 12.0];
        let low = vec![8.0, 9.0, 10.0, 11.0, 10.0];
        let close = vec![9.0, 10.0, 11.0, 12.0, 10.0];

        let kdj = calculate_kdj(&high, &low, &close, 3, 2);

        assert_eq!(kdj.k.first_valid_index(), Some(2));
        // Window [0..=2]: range 8..12, close 11
        assert_relative_eq!(kdj.k.value_at(2).unwrap(), 75.0);
        // Window [1..=3]: range 9..13, close 12
        assert_relative_eq!(kdj.k.value_at(3).unwrap(), 75.0);
        // Window [2..=4]: range 10..13, close 10
        assert_relative_eq!(kdj.k.value_at(4).unwrap(), 0.0);

        assert_eq!(kdj.d.first_valid_index(), Some(3));
        assert_relative_eq!(kdj.d.value_at(4).unwrap(), 37.5);
        assert_relative_eq!(kdj.j.value_at(4).unwrap(), -75.0);
    }

    #[test]
    fn test_kdj_flat_market_is_neutral() {
        let flat = vec![20.0; 12];
        let kdj = calculate_kdj(&flat, &flat, &flat, 9, 3);

        for i in 8..12 {
            assert_eq!(kdj.k.value_at(i), Some(50.0));
        }
        for i in 10..12 {
            assert_eq!(kdj.d.value_at(i), Some(50.0));
            assert_eq!(kdj.j.value_at(i), Some(50.0));
        }
    }

    #[test]
    fn test_kdj_j_invalid_during_warmup() {
        let high: Vec<f64> = (0..15).map(|i| 11.0 + i as f64).collect();
        let low: Vec<f64> = (0..15).map(|i| 9.0 + i as f64).collect();
        let close: Vec<f64> = (0..15).map(|i| 10.0 + i as f64).collect();

        let kdj = calculate_kdj(&high, &low, &close, 9, 3);

        for i in 0..10 {
            assert!(!kdj.j.is_valid(i));
        }
        assert!(kdj.j.is_valid(10));
    }

    #[test]
    fn test_kdj_mismatched_lengths() {
        let high = vec![10.0; 12];
        let low = vec![8.0; 11];
        let close = vec![9.0; 12];

        let kdj = calculate_kdj(&high, &low, &close, 9, 3);
        assert_eq!(kdj.k, IndicatorSeries::invalid(12));
        assert_eq!(kdj.d.len(), 12);
        assert_eq!(kdj.j.valid_count(), 0);
    }

    #[test]
    fn test_kdj_requires_more_than_period_samples() {
        let series = vec![10.0; 9];
        let kdj = calculate_kdj(&series, &series, &series, 9, 3);
        assert_eq!(kdj.k.valid_count(), 0);
    }

    #[test]
    fn test_kdj_strict_reports_errors() {
        let high = vec![10.0; 12];
        let low = vec![8.0; 11];
        let close = vec![9.0; 12];

        assert!(matches!(
            calculate_kdj_strict(&high, &low, &close, 9, 3),
            Err(IndicatorError::ShapeMismatch { .. })
        ));

        let short = vec![9.0; 5];
        assert!(matches!(
            calculate_kdj_strict(&short, &short, &short, 9, 3),
            Err(IndicatorError::InsufficientData { need: 10, got: 5 })
        ));

        assert!(calculate_kdj_strict(&high, &high, &close, 9, 3).is_ok());
    }
}
