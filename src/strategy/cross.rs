use crate::error::IndicatorError;
use crate::indicators::calculate_sma;
use crate::indicators::validation::ensure_period;
use crate::models::{CrossEvent, CrossKind, IndicatorSeries, SeriesValue};

/// Classify index `i` from the pairs at `i - 1` and `i`
///
/// Equal values count as "not above", so only a strict change of side
/// between consecutive samples registers a cross.
pub fn classify_cross(prev_short: f64, prev_long: f64, short: f64, long: f64) -> CrossKind {
    let prev_above = prev_short > prev_long;
    let curr_above = short > long;

    match (prev_above, curr_above) {
        (false, true) => CrossKind::GoldenCross,
        (true, false) => CrossKind::DeathCross,
        _ => CrossKind::NoCross,
    }
}

/// The four values needed to classify index `i`, if all are valid
fn pair_at<T: SeriesValue>(short: &[T], long: &[T], i: usize) -> Option<(f64, f64, f64, f64)> {
    if i == 0 {
        return None;
    }
    Some((
        short[i - 1].value()?,
        long[i - 1].value()?,
        short[i].value()?,
        long[i].value()?,
    ))
}

/// Classify every index of a short/long moving-average pair
///
/// Index 0 and any index where a value at `i - 1` or `i` is invalid are
/// `NoCross`. Series of unequal length yield all `NoCross` (sized to `short`).
pub fn detect_crosses<T: SeriesValue>(short: &[T], long: &[T]) -> Vec<CrossKind> {
    if short.len() != long.len() {
        tracing::debug!(
            short = short.len(),
            long = long.len(),
            "Cross detection: series length mismatch, reporting no crosses"
        );
        return vec![CrossKind::NoCross; short.len()];
    }

    (0..short.len())
        .map(|i| match pair_at(short, long, i) {
            Some((prev_short, prev_long, curr_short, curr_long)) => {
                classify_cross(prev_short, prev_long, curr_short, curr_long)
            }
            None => CrossKind::NoCross,
        })
        .collect()
}

/// Strict variant of [`detect_crosses`] that rejects mismatched lengths
pub fn detect_crosses_strict<T: SeriesValue>(
    short: &[T],
    long: &[T],
) -> Result<Vec<CrossKind>, IndicatorError> {
    if short.len() != long.len() {
        return Err(IndicatorError::ShapeMismatch {
            expected: short.len(),
            got: long.len(),
        });
    }
    Ok(detect_crosses(short, long))
}

/// Compute both SMAs from `prices` and classify them
pub fn detect_crosses_with_prices(
    prices: &[f64],
    short_period: usize,
    long_period: usize,
) -> (Vec<CrossKind>, IndicatorSeries, IndicatorSeries) {
    let short = calculate_sma(prices, short_period);
    let long = calculate_sma(prices, long_period);
    let crosses = detect_crosses(&short, &long);
    (crosses, short, long)
}

/// Label for index `i`: the caller's label if present, otherwise `Day{i + 1}`
pub fn label_for<S: AsRef<str>>(labels: &[S], i: usize) -> String {
    labels
        .get(i)
        .map(|l| l.as_ref().to_string())
        .unwrap_or_else(|| format!("Day{}", i + 1))
}

/// Build cross events from precomputed averages
///
/// One event per index where both averages are valid at `i - 1` and `i`.
/// Mismatched lengths produce no events.
pub fn cross_events<S: AsRef<str>>(
    prices: &[f64],
    short: &IndicatorSeries,
    long: &IndicatorSeries,
    labels: &[S],
) -> Vec<CrossEvent> {
    if short.len() != prices.len() || long.len() != prices.len() {
        tracing::debug!(
            prices = prices.len(),
            short = short.len(),
            long = long.len(),
            "Cross events: series length mismatch, no events"
        );
        return Vec::new();
    }

    (1..prices.len())
        .filter_map(|i| {
            let (prev_short, prev_long, short_value, long_value) = pair_at(short, long, i)?;
            Some(CrossEvent {
                index: i,
                label: label_for(labels, i),
                price: prices[i],
                short_value,
                long_value,
                kind: classify_cross(prev_short, prev_long, short_value, long_value),
            })
        })
        .collect()
}

/// Detailed SMA cross analysis over a price series
pub fn analyze_crosses<S: AsRef<str>>(
    prices: &[f64],
    short_period: usize,
    long_period: usize,
    labels: &[S],
) -> Vec<CrossEvent> {
    let short = calculate_sma(prices, short_period);
    let long = calculate_sma(prices, long_period);
    cross_events(prices, &short, &long, labels)
}

/// Strict variant of [`analyze_crosses`]
pub fn analyze_crosses_strict<S: AsRef<str>>(
    prices: &[f64],
    short_period: usize,
    long_period: usize,
    labels: &[S],
) -> Result<Vec<CrossEvent>, IndicatorError> {
    ensure_period(short_period)?;
    ensure_period(long_period)?;
    let need = short_period.max(long_period) + 1;
    if prices.len() < need {
        return Err(IndicatorError::InsufficientData {
            need,
            got: prices.len(),
        });
    }
    Ok(analyze_crosses(prices, short_period, long_period, labels))
}

/// Absolute distance between two averages, invalid where either is invalid
pub fn ma_divergence<T: SeriesValue>(short: &[T], long: &[T]) -> IndicatorSeries {
    if short.len() != long.len() {
        return IndicatorSeries::invalid(short.len());
    }

    short
        .iter()
        .zip(long.iter())
        .map(|(s, l)| Some((s.value()? - l.value()?).abs()))
        .collect()
}
