use crate::models::{CrossEvent, CrossKind, CrossStatistics, SeriesValue, TrendState};

/// Up to `limit` most recent non-`NoCross` events, in chronological order
pub fn recent_crosses(events: &[CrossEvent], limit: usize) -> Vec<CrossEvent> {
    let mut recent: Vec<CrossEvent> = events
        .iter()
        .rev()
        .filter(|e| e.kind.is_cross())
        .take(limit)
        .cloned()
        .collect();
    recent.reverse();
    recent
}

/// Indices of up to `limit` most recent events of `kind`, ascending
pub fn find_crosses_by_kind(events: &[CrossEvent], kind: CrossKind, limit: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = events
        .iter()
        .rev()
        .filter(|e| e.kind == kind)
        .take(limit)
        .map(|e| e.index)
        .collect();
    indices.reverse();
    indices
}

/// Trend from the most recent index where both averages are valid
///
/// Series of unequal length are compared over their common prefix.
pub fn current_trend<T: SeriesValue>(short: &[T], long: &[T]) -> TrendState {
    let latest = short
        .iter()
        .zip(long.iter())
        .rev()
        .find_map(|(s, l)| Some((s.value()?, l.value()?)));

    match latest {
        Some((s, l)) if s > l => TrendState::Bullish,
        Some((s, l)) if s < l => TrendState::Bearish,
        _ => TrendState::Indeterminate,
    }
}

/// Tally of each cross kind across the event sequence
pub fn cross_statistics(events: &[CrossEvent]) -> CrossStatistics {
    tally_kinds(events.iter().map(|e| e.kind))
}

/// Tally of a raw classification sequence, e.g. from `detect_crosses`
pub fn tally_kinds<I: IntoIterator<Item = CrossKind>>(kinds: I) -> CrossStatistics {
    kinds
        .into_iter()
        .fold(CrossStatistics::default(), |mut stats, kind| {
            match kind {
                CrossKind::GoldenCross => stats.golden_crosses += 1,
                CrossKind::DeathCross => stats.death_crosses += 1,
                CrossKind::NoCross => stats.no_crosses += 1,
            }
            stats
        })
}
