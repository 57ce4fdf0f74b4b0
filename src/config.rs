use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::IndicatorError;
use crate::Result;

/// Environment prefix for overrides, e.g. `TECHNICAL__RSI__PERIOD=10`
pub const ENV_PREFIX: &str = "TECHNICAL";

/// Which moving average the cross analysis compares
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AverageKind {
    #[default]
    Simple,
    Exponential,
}

/// Configuration for moving-average cross analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossConfig {
    pub short_period: usize,
    pub long_period: usize,
    pub recent_limit: usize, // How many recent crosses to report
    pub average: AverageKind,
}

impl Default for CrossConfig {
    fn default() -> Self {
        Self {
            short_period: 5,
            long_period: 20,
            recent_limit: 3,
            average: AverageKind::Simple,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacdConfig {
    pub fast_period: usize,
    pub slow_period: usize,
    pub signal_period: usize,
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self {
            fast_period: 12,
            slow_period: 26,
            signal_period: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    pub period: usize,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self { period: 14 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdjConfig {
    pub period: usize,
    pub signal_period: usize,
}

impl Default for KdjConfig {
    fn default() -> Self {
        Self {
            period: 9,
            signal_period: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BollingerConfig {
    pub period: usize,
    pub multiplier: f64,
}

impl Default for BollingerConfig {
    fn default() -> Self {
        Self {
            period: 20,
            multiplier: 2.0,
        }
    }
}

/// Parameters for every indicator the engine computes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub cross: CrossConfig,
    pub macd: MacdConfig,
    pub rsi: RsiConfig,
    pub kdj: KdjConfig,
    pub bollinger: BollingerConfig,
}

impl EngineConfig {
    /// Load defaults, then an optional file, then `TECHNICAL__*` environment overrides
    ///
    /// # Arguments
    /// * `path` - Optional config file (format inferred from its extension)
    ///
    /// # Returns
    /// The merged and validated configuration
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let config: EngineConfig = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        tracing::debug!(?config, "Loaded engine config");
        Ok(config)
    }

    /// Reject parameters that can only ever produce all-invalid output
    pub fn validate(&self) -> Result<()> {
        let periods = [
            ("cross.short_period", self.cross.short_period),
            ("cross.long_period", self.cross.long_period),
            ("macd.fast_period", self.macd.fast_period),
            ("macd.slow_period", self.macd.slow_period),
            ("macd.signal_period", self.macd.signal_period),
            ("rsi.period", self.rsi.period),
            ("kdj.period", self.kdj.period),
            ("kdj.signal_period", self.kdj.signal_period),
            ("bollinger.period", self.bollinger.period),
        ];

        if let Some((name, _)) = periods.iter().find(|(_, period)| *period == 0) {
            return Err(IndicatorError::InvalidConfig(format!(
                "{name} must be at least 1"
            )));
        }

        if self.cross.short_period >= self.cross.long_period {
            return Err(IndicatorError::InvalidConfig(format!(
                "cross.short_period ({}) must be less than cross.long_period ({})",
                self.cross.short_period, self.cross.long_period
            )));
        }

        if self.macd.fast_period >= self.macd.slow_period {
            return Err(IndicatorError::InvalidConfig(format!(
                "macd.fast_period ({}) must be less than macd.slow_period ({})",
                self.macd.fast_period, self.macd.slow_period
            )));
        }

        if !self.bollinger.multiplier.is_finite() || self.bollinger.multiplier < 0.0 {
            return Err(IndicatorError::InvalidConfig(format!(
                "bollinger.multiplier must be a non-negative number, got {}",
                self.bollinger.multiplier
            )));
        }

        Ok(())
    }

    /// Samples needed before every configured indicator has a value
    pub fn min_samples_required(&self) -> usize {
        [
            self.cross.long_period + 1,
            self.macd.slow_period + self.macd.signal_period - 1,
            self.rsi.period + 1,
            self.kdj.period + self.kdj.signal_period,
            self.bollinger.period,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}
