//! Length and period preconditions shared by every indicator
//!
//! The `has_*` checks drive the permissive batch functions (degenerate input
//! yields an all-invalid series). The `ensure_*` checks back the strict
//! entry points and report the same conditions as errors.

use crate::error::IndicatorError;

/// True if a series of `len` samples can produce at least one value for `period`
pub fn has_sufficient_data(len: usize, period: usize) -> bool {
    period > 0 && len >= period
}

/// True if every slice has the same length
pub fn is_aligned(series: &[&[f64]]) -> bool {
    match series.split_first() {
        Some((first, rest)) => rest.iter().all(|s| s.len() == first.len()),
        None => true,
    }
}

pub fn ensure_period(period: usize) -> Result<(), IndicatorError> {
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod(period));
    }
    Ok(())
}

/// Require a positive period and at least `need` samples
pub fn ensure_sufficient(len: usize, period: usize, need: usize) -> Result<(), IndicatorError> {
    ensure_period(period)?;
    if len < need {
        return Err(IndicatorError::InsufficientData { need, got: len });
    }
    Ok(())
}

/// Require every slice to match the length of the first
pub fn ensure_aligned(series: &[&[f64]]) -> Result<(), IndicatorError> {
    if let Some((first, rest)) = series.split_first() {
        if let Some(bad) = rest.iter().find(|s| s.len() != first.len()) {
            return Err(IndicatorError::ShapeMismatch {
                expected: first.len(),
                got: bad.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sufficient_data() {
        assert!(has_sufficient_data(5, 5));
        assert!(has_sufficient_data(10, 5));
        assert!(!has_sufficient_data(4, 5));
        assert!(!has_sufficient_data(10, 0));
        assert!(!has_sufficient_data(0, 1));
    }

    #[test]
    fn test_alignment() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0, 3.0];
        let c = [1.0, 2.0];

        assert!(is_aligned(&[&a, &b]));
        assert!(!is_aligned(&[&a, &b, &c]));
        assert!(is_aligned(&[]));
    }

    #[test]
    fn test_ensure_aligned_reports_mismatch() {
        let a = [1.0, 2.0, 3.0];
        let c = [1.0, 2.0];

        let err = ensure_aligned(&[&a, &c]).unwrap_err();
        assert!(matches!(
            err,
            IndicatorError::ShapeMismatch {
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn test_ensure_sufficient() {
        assert!(ensure_sufficient(10, 5, 5).is_ok());
        assert!(matches!(
            ensure_sufficient(10, 0, 0),
            Err(IndicatorError::InvalidPeriod(0))
        ));
        assert!(matches!(
            ensure_sufficient(3, 5, 6),
            Err(IndicatorError::InsufficientData { need: 6, got: 3 })
        ));
    }
}
