use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::Candle;

/// Market scenario types for synthetic data generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MarketScenario {
    /// Steady uptrend with noise (+2% daily average)
    Uptrend,
    /// Steady downtrend with noise (-2% daily average)
    Downtrend,
    /// Sideways/choppy market (±1% around mean)
    Sideways,
    /// High volatility (±5% large swings)
    Volatile,
    /// Rally, selloff, then recovery (produces both cross kinds)
    Reversal,
}

/// Generates deterministic synthetic candles to feed the indicators
pub struct SyntheticDataGenerator {
    rng: StdRng,
    base_price: f64,
    base_volume: f64,
}

impl SyntheticDataGenerator {
    /// Create a new generator with a seed for reproducibility
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            base_price: 150.0,
            base_volume: 1_000_000.0,
        }
    }

    /// Generate candles for a specific market scenario
    ///
    /// # Arguments
    /// * `scenario` - The market scenario to simulate
    /// * `start_time` - Timestamp of the first candle
    /// * `num_candles` - Number of candles to generate
    /// * `interval_minutes` - Minutes between candles (1440 for daily bars)
    ///
    /// # Returns
    /// Gap-free, chronologically ordered candles
    pub fn generate(
        &mut self,
        scenario: MarketScenario,
        start_time: DateTime<Utc>,
        num_candles: usize,
        interval_minutes: i64,
    ) -> Vec<Candle> {
        // Daily drift rates scaled to one interval
        let intervals_per_day = 24.0 * 60.0 / interval_minutes.max(1) as f64;
        let mut candles = Vec::with_capacity(num_candles);
        let mut current_price = self.base_price;

        for i in 0..num_candles {
            let timestamp = start_time + Duration::minutes(i as i64 * interval_minutes);
            current_price = self.step(scenario, current_price, i, num_candles, intervals_per_day);
            candles.push(self.create_candle(current_price, timestamp));
        }

        candles
    }

    fn step(
        &mut self,
        scenario: MarketScenario,
        price: f64,
        i: usize,
        num_candles: usize,
        intervals_per_day: f64,
    ) -> f64 {
        match scenario {
            MarketScenario::Uptrend => {
                let drift = price * 0.02 / intervals_per_day;
                price + drift + price * self.rng.gen_range(-0.001..0.001)
            }
            MarketScenario::Downtrend => {
                let drift = price * -0.02 / intervals_per_day;
                price + drift + price * self.rng.gen_range(-0.001..0.001)
            }
            MarketScenario::Sideways => {
                // Mean reversion force + noise
                let reversion = (self.base_price - price) * 0.1;
                price + reversion + price * self.rng.gen_range(-0.01..0.01)
            }
            MarketScenario::Volatile => {
                let next = price + price * self.rng.gen_range(-0.05..0.05);
                // Prevent price from going too low
                next.max(self.base_price * 0.5)
            }
            MarketScenario::Reversal => {
                let third = (num_candles / 3).max(1);
                let direction = if i / third == 1 { -1.0 } else { 1.0 };
                let drift = price * direction * 0.03 / intervals_per_day;
                price + drift + price * self.rng.gen_range(-0.002..0.002)
            }
        }
    }

    /// Helper to create a candle from price and timestamp
    fn create_candle(&mut self, price: f64, timestamp: DateTime<Utc>) -> Candle {
        let noise_pct = 0.002; // ±0.2% intrabar movement

        let high = price * (1.0 + self.rng.gen_range(0.0..noise_pct));
        let low = price * (1.0 - self.rng.gen_range(0.0..noise_pct));

        let open_raw = price * (1.0 + self.rng.gen_range(-noise_pct..noise_pct));
        let open = open_raw.clamp(low, high);

        // Vary volume ±30%
        let volume = self.base_volume * self.rng.gen_range(0.7..1.3);

        Candle {
            timestamp,
            open,
            high,
            low,
            close: price,
            volume,
        }
    }
}
