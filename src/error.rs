use thiserror::Error;

/// Errors reported by the strict entry points and configuration loading.
///
/// The batch indicator functions never return these; they degrade to
/// all-invalid series instead.
#[derive(Debug, Error)]
pub enum IndicatorError {
    #[error("Invalid period: {0} (must be at least 1)")]
    InvalidPeriod(usize),

    #[error("Insufficient data: need {need} samples, got {got}")]
    InsufficientData { need: usize, got: usize },

    #[error("Series length mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Config(#[from] config::ConfigError),
}
