//! Incremental indicators fed one sample at a time
//!
//! Each accumulator keeps only the rolling state its indicator needs and
//! produces, for every sample, the same value the batch function produces
//! at that index.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::kdj::{percent_j, percent_k};
use super::moving_average::{ema_multiplier, ema_step, window_mean};
use super::rsi::{rsi_value, split_change, wilder_smooth};

/// Streaming (incremental) indicator
pub trait StreamingIndicator {
    type Input;
    type Output;

    /// Process the next sample and return the value at its index
    fn next(&mut self, input: Self::Input) -> Self::Output;

    /// Drop all accumulated state
    fn reset(&mut self);

    fn period(&self) -> usize;

    /// Whether the most recent sample produced a value
    fn is_ready(&self) -> bool;
}

/// Rolling SMA over a bounded window
#[derive(Debug, Clone)]
pub struct StreamingSma {
    period: usize,
    window: VecDeque<f64>,
}

impl StreamingSma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            window: VecDeque::with_capacity(period),
        }
    }
}

impl StreamingIndicator for StreamingSma {
    type Input = f64;
    type Output = Option<f64>;

    fn next(&mut self, price: f64) -> Option<f64> {
        if self.period == 0 {
            return None;
        }

        self.window.push_back(price);
        while self.window.len() > self.period {
            self.window.pop_front();
        }

        self.is_ready()
            .then(|| window_mean(self.window.iter().copied(), self.period))
    }

    fn reset(&mut self) {
        self.window.clear();
    }

    fn period(&self) -> usize {
        self.period
    }

    fn is_ready(&self) -> bool {
        self.period > 0 && self.window.len() == self.period
    }
}

/// EMA seeded from the first full SMA window
#[derive(Debug, Clone)]
pub struct StreamingEma {
    period: usize,
    multiplier: f64,
    seed: StreamingSma,
    last: Option<f64>,
}

impl StreamingEma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            multiplier: ema_multiplier(period),
            seed: StreamingSma::new(period),
            last: None,
        }
    }
}

impl StreamingIndicator for StreamingEma {
    type Input = f64;
    type Output = Option<f64>;

    fn next(&mut self, price: f64) -> Option<f64> {
        self.last = match self.last {
            Some(previous) => Some(ema_step(price, previous, self.multiplier)),
            None => self.seed.next(price),
        };
        self.last
    }

    fn reset(&mut self) {
        self.seed.reset();
        self.last = None;
    }

    fn period(&self) -> usize {
        self.period
    }

    fn is_ready(&self) -> bool {
        self.last.is_some()
    }
}

/// RSI with Wilder-smoothed gain/loss averages
#[derive(Debug, Clone)]
pub struct StreamingRsi {
    period: usize,
    previous_price: Option<f64>,
    changes: usize,
    gain_sum: f64,
    loss_sum: f64,
    avg_gain: f64,
    avg_loss: f64,
}

impl StreamingRsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            previous_price: None,
            changes: 0,
            gain_sum: 0.0,
            loss_sum: 0.0,
            avg_gain: 0.0,
            avg_loss: 0.0,
        }
    }
}

impl StreamingIndicator for StreamingRsi {
    type Input = f64;
    type Output = Option<f64>;

    fn next(&mut self, price: f64) -> Option<f64> {
        if self.period == 0 {
            return None;
        }

        let previous = self.previous_price.replace(price)?;
        let (gain, loss) = split_change(price - previous);
        self.changes += 1;

        if self.changes < self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
            return None;
        }

        if self.changes == self.period {
            self.gain_sum += gain;
            self.loss_sum += loss;
            self.avg_gain = self.gain_sum / self.period as f64;
            self.avg_loss = self.loss_sum / self.period as f64;
        } else {
            self.avg_gain = wilder_smooth(self.avg_gain, gain, self.period);
            self.avg_loss = wilder_smooth(self.avg_loss, loss, self.period);
        }

        Some(rsi_value(self.avg_gain, self.avg_loss))
    }

    fn reset(&mut self) {
        *self = Self::new(self.period);
    }

    fn period(&self) -> usize {
        self.period
    }

    fn is_ready(&self) -> bool {
        self.period > 0 && self.changes >= self.period
    }
}

/// One streaming KDJ output
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KdjValue {
    pub k: Option<f64>,
    pub d: Option<f64>,
    pub j: Option<f64>,
}

/// One high/low/close sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighLowClose {
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// KDJ with monotonic deques for the window high/low
///
/// `highs` holds (index, high) with strictly decreasing highs, `lows` holds
/// (index, low) with strictly increasing lows, so each front is the window
/// extreme and every sample is pushed and popped at most once.
#[derive(Debug, Clone)]
pub struct StreamingKdj {
    period: usize,
    index: usize,
    highs: VecDeque<(usize, f64)>,
    lows: VecDeque<(usize, f64)>,
    d_line: StreamingSma,
    last: KdjValue,
}

impl StreamingKdj {
    pub fn new(period: usize, signal_period: usize) -> Self {
        Self {
            period,
            index: 0,
            highs: VecDeque::with_capacity(period),
            lows: VecDeque::with_capacity(period),
            d_line: StreamingSma::new(signal_period),
            last: KdjValue::default(),
        }
    }

    fn push_extremes(&mut self, high: f64, low: f64) {
        while self.highs.back().is_some_and(|&(_, h)| h <= high) {
            self.highs.pop_back();
        }
        self.highs.push_back((self.index, high));

        while self.lows.back().is_some_and(|&(_, l)| l >= low) {
            self.lows.pop_back();
        }
        self.lows.push_back((self.index, low));

        let window_start = (self.index + 1).saturating_sub(self.period);
        while self.highs.front().is_some_and(|&(i, _)| i < window_start) {
            self.highs.pop_front();
        }
        while self.lows.front().is_some_and(|&(i, _)| i < window_start) {
            self.lows.pop_front();
        }
    }
}

impl StreamingIndicator for StreamingKdj {
    type Input = HighLowClose;
    type Output = KdjValue;

    fn next(&mut self, bar: HighLowClose) -> KdjValue {
        if self.period == 0 {
            return KdjValue::default();
        }

        self.push_extremes(bar.high, bar.low);
        let warmed_up = self.index + 1 >= self.period;
        self.index += 1;

        if !warmed_up {
            self.last = KdjValue::default();
            return self.last;
        }

        let (Some(&(_, highest_high)), Some(&(_, lowest_low))) =
            (self.highs.front(), self.lows.front())
        else {
            self.last = KdjValue::default();
            return self.last;
        };

        let k = percent_k(bar.close, highest_high, lowest_low);
        let d = self.d_line.next(k);
        self.last = KdjValue {
            k: Some(k),
            d,
            j: d.map(|d| percent_j(k, d)),
        };
        self.last
    }

    fn reset(&mut self) {
        self.index = 0;
        self.highs.clear();
        self.lows.clear();
        self.d_line.reset();
        self.last = KdjValue::default();
    }

    fn period(&self) -> usize {
        self.period
    }

    fn is_ready(&self) -> bool {
        self.last.d.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{calculate_ema, calculate_kdj, calculate_rsi, calculate_sma};

    fn sample_prices() -> Vec<f64> {
        vec![
            44.0, 44.25, 44.5, 43.75, 44.0, 44.5, 45.0, 45.5, 45.25, 45.5, 46.0, 46.5, 46.25, 46.0,
            46.5, 47.0, 46.75, 45.9, 45.1, 45.6, 46.2, 46.9, 47.3, 46.8,
        ]
    }

    #[test]
    fn test_streaming_sma_matches_batch() {
        let prices = sample_prices();
        let batch = calculate_sma(&prices, 5);
        let mut sma = StreamingSma::new(5);

        let streamed: Vec<Option<f64>> = prices.iter().map(|&p| sma.next(p)).collect();
        assert_eq!(&batch[..], &streamed[..]);
        assert!(sma.is_ready());
    }

    #[test]
    fn test_streaming_ema_matches_batch() {
        let prices = sample_prices();
        let batch = calculate_ema(&prices, 6);
        let mut ema = StreamingEma::new(6);

        let streamed: Vec<Option<f64>> = prices.iter().map(|&p| ema.next(p)).collect();
        assert_eq!(&batch[..], &streamed[..]);
    }

    #[test]
    fn test_streaming_rsi_matches_batch() {
        let prices = sample_prices();
        let batch = calculate_rsi(&prices, 14);
        let mut rsi = StreamingRsi::new(14);

        let streamed: Vec<Option<f64>> = prices.iter().map(|&p| rsi.next(p)).collect();
        assert_eq!(&batch[..], &streamed[..]);
    }

    #[test]
    fn test_streaming_kdj_matches_batch() {
        let close = sample_prices();
        let high: Vec<f64> = close.iter().map(|c| c + 0.4).collect();
        let low: Vec<f64> = close.iter().map(|c| c - 0.6).collect();

        let batch = calculate_kdj(&high, &low, &close, 9, 3);
        let mut kdj = StreamingKdj::new(9, 3);

        for i in 0..close.len() {
            let value = kdj.next(HighLowClose {
                high: high[i],
                low: low[i],
                close: close[i],
            });
            assert_eq!(value.k, batch.k[i], "K differs at {i}");
            assert_eq!(value.d, batch.d[i], "D differs at {i}");
            assert_eq!(value.j, batch.j[i], "J differs at {i}");
        }
    }

    #[test]
    fn test_monotonic_window_drops_expired_extremes() {
        let mut kdj = StreamingKdj::new(3, 1);
        let bars = [(20.0, 1.0), (10.0, 5.0), (11.0, 6.0), (12.0, 7.0)];

        let mut last = KdjValue::default();
        for (high, low) in bars {
            last = kdj.next(HighLowClose {
                high,
                low,
                close: 9.0,
            });
        }

        // Window is the last three bars: high 12, low 5
        let expected = (9.0 - 5.0) / (12.0 - 5.0) * 100.0;
        assert_eq!(last.k, Some(expected));
    }

    #[test]
    fn test_reset_clears_state() {
        let mut rsi = StreamingRsi::new(3);
        for p in [1.0, 2.0, 3.0, 4.0] {
            rsi.next(p);
        }
        assert!(rsi.is_ready());

        rsi.reset();
        assert!(!rsi.is_ready());
        assert_eq!(rsi.next(10.0), None);
    }

    #[test]
    fn test_zero_period_never_ready() {
        let mut sma = StreamingSma::new(0);
        let mut ema = StreamingEma::new(0);
        assert_eq!(sma.next(1.0), None);
        assert_eq!(ema.next(1.0), None);
        assert!(!sma.is_ready());
        assert!(!ema.is_ready());
    }
}
