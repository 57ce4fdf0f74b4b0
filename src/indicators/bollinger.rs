use super::moving_average::calculate_sma;
use crate::models::{BollingerBands, IndicatorSeries};

/// Calculate Bollinger Bands
///
/// Middle Band = SMA(period)
/// Upper Band = Middle + (multiplier * standard deviation)
/// Lower Band = Middle - (multiplier * standard deviation)
///
/// The deviation is the population standard deviation of the trailing
/// `period` samples. Wherever the middle band is invalid, all three are.
pub fn calculate_bollinger_bands(prices: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    let middle = calculate_sma(prices, period);
    let len = prices.len();

    let mut upper = vec![None; len];
    let mut lower = vec![None; len];

    for (i, mid) in middle.iter().enumerate() {
        let Some(mid) = *mid else { continue };

        let window = &prices[i + 1 - period..=i];
        let variance = window.iter().map(|p| (p - mid).powi(2)).sum::<f64>() / period as f64;
        let std_dev = variance.sqrt();

        upper[i] = Some(mid + multiplier * std_dev);
        lower[i] = Some(mid - multiplier * std_dev);
    }

    BollingerBands {
        upper: IndicatorSeries::from_values(upper),
        middle,
        lower: IndicatorSeries::from_values(lower),
    }
}

/// Calculate Bollinger Bands with default parameters (20 SMA, 2σ)
pub fn calculate_bollinger_bands_default(prices: &[f64]) -> BollingerBands {
    calculate_bollinger_bands(prices, 20, 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bollinger_hand_computed() {
        // Window [2, 4, 4, 4, 5, 5, 7, 9]: mean 5, population std 2
        let prices = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let bands = calculate_bollinger_bands(&prices, 8, 2.0);

        assert_eq!(bands.middle.value_at(7), Some(5.0));
        assert_relative_eq!(bands.upper.value_at(7).unwrap(), 9.0);
        assert_relative_eq!(bands.lower.value_at(7).unwrap(), 1.0);
        assert_eq!(bands.upper.valid_count(), 1);
    }

    #[test]
    fn test_bollinger_flat_prices_collapse() {
        let prices = vec![42.0; 25];
        let bands = calculate_bollinger_bands_default(&prices);

        for i in 19..25 {
            assert_eq!(bands.upper.value_at(i), Some(42.0));
            assert_eq!(bands.middle.value_at(i), Some(42.0));
            assert_eq!(bands.lower.value_at(i), Some(42.0));
        }
    }

    #[test]
    fn test_bollinger_warmup_aligned() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).sin() * 5.0).collect();
        let bands = calculate_bollinger_bands(&prices, 10, 2.0);

        assert_eq!(bands.upper.len(), 30);
        for i in 0..30 {
            assert_eq!(bands.upper.is_valid(i), bands.middle.is_valid(i));
            assert_eq!(bands.lower.is_valid(i), bands.middle.is_valid(i));
            if let (Some(u), Some(m), Some(l)) = (
                bands.upper.value_at(i),
                bands.middle.value_at(i),
                bands.lower.value_at(i),
            ) {
                assert!(u >= m && m >= l);
            }
        }
    }

    #[test]
    fn test_bollinger_insufficient_data() {
        let prices = vec![1.0, 2.0, 3.0];
        let bands = calculate_bollinger_bands(&prices, 5, 2.0);

        assert_eq!(bands.upper, IndicatorSeries::invalid(3));
        assert_eq!(bands.middle, IndicatorSeries::invalid(3));
        assert_eq!(bands.lower, IndicatorSeries::invalid(3));
    }
}
