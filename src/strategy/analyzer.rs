use serde::{Deserialize, Serialize};

use super::aggregate::{cross_statistics, current_trend, recent_crosses};
use super::cross::cross_events;
use crate::config::{AverageKind, CrossConfig, EngineConfig};
use crate::indicators::{
    calculate_bollinger_bands, calculate_ema, calculate_kdj, calculate_macd, calculate_rsi,
    calculate_sma,
};
use crate::models::{
    self, BollingerBands, Candle, CrossEvent, CrossStatistics, IndicatorSeries, KdjResult,
    MacdResult, TrendState,
};

/// Full result of a moving-average cross analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossReport {
    pub short_average: IndicatorSeries,
    pub long_average: IndicatorSeries,
    pub events: Vec<CrossEvent>,
    pub recent: Vec<CrossEvent>,
    pub trend: TrendState,
    pub statistics: CrossStatistics,
}

/// Golden/death cross analysis for one short/long pair
#[derive(Debug, Clone, Default)]
pub struct MaCrossAnalyzer {
    config: CrossConfig,
}

impl MaCrossAnalyzer {
    pub fn new(config: CrossConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CrossConfig {
        &self.config
    }

    /// Short and long averages of the configured kind
    pub fn averages(&self, prices: &[f64]) -> (IndicatorSeries, IndicatorSeries) {
        let average = match self.config.average {
            AverageKind::Simple => calculate_sma::<f64>,
            AverageKind::Exponential => calculate_ema::<f64>,
        };
        (
            average(prices, self.config.short_period),
            average(prices, self.config.long_period),
        )
    }

    /// Classify every evaluable index and summarize the result
    ///
    /// `labels` are per-index timestamps; missing ones become `Day{n}`.
    pub fn analyze<S: AsRef<str>>(&self, prices: &[f64], labels: &[S]) -> CrossReport {
        let (short_average, long_average) = self.averages(prices);
        let events = cross_events(prices, &short_average, &long_average, labels);
        let recent = recent_crosses(&events, self.config.recent_limit);
        let trend = current_trend(&short_average, &long_average);
        let statistics = cross_statistics(&events);

        tracing::debug!(
            samples = prices.len(),
            short_period = self.config.short_period,
            long_period = self.config.long_period,
            golden = statistics.golden_crosses,
            death = statistics.death_crosses,
            %trend,
            "MA cross analysis complete"
        );
        for event in &recent {
            tracing::info!(
                "{} at {} (index {}): price={:.4}, short MA={:.4}, long MA={:.4}",
                event.kind,
                event.label,
                event.index,
                event.price,
                event.short_value,
                event.long_value
            );
        }

        CrossReport {
            short_average,
            long_average,
            events,
            recent,
            trend,
            statistics,
        }
    }
}

/// Every configured indicator over one candle series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalReport {
    pub samples: usize,
    pub macd: MacdResult,
    pub rsi: IndicatorSeries,
    pub kdj: KdjResult,
    pub bollinger: BollingerBands,
    pub crosses: CrossReport,
}

/// Run every indicator and the cross analysis over `candles`
pub fn analyze_candles(candles: &[Candle], config: &EngineConfig) -> TechnicalReport {
    let close = models::closes(candles);
    let high = models::highs(candles);
    let low = models::lows(candles);
    let labels = models::timestamp_labels(candles);

    if candles.len() < config.min_samples_required() {
        tracing::warn!(
            "Only {} candles, {} needed before every indicator is warmed up",
            candles.len(),
            config.min_samples_required()
        );
    }

    let macd = calculate_macd(
        &close,
        config.macd.fast_period,
        config.macd.slow_period,
        config.macd.signal_period,
    );
    let rsi = calculate_rsi(&close, config.rsi.period);
    let kdj = calculate_kdj(&high, &low, &close, config.kdj.period, config.kdj.signal_period);
    let bollinger =
        calculate_bollinger_bands(&close, config.bollinger.period, config.bollinger.multiplier);
    let crosses = MaCrossAnalyzer::new(config.cross.clone()).analyze(&close, &labels);

    tracing::debug!(
        "Indicators: RSI={:?}, MACD={:?}, K={:?}, Trend={}",
        rsi.last_valid().map(|(_, v)| v),
        macd.macd_line.last_valid().map(|(_, v)| v),
        kdj.k.last_valid().map(|(_, v)| v),
        crosses.trend
    );

    TechnicalReport {
        samples: candles.len(),
        macd,
        rsi,
        kdj,
        bollinger,
        crosses,
    }
}
