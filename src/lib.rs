// Core modules
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod strategy;
pub mod synthetic;

// Re-export commonly used types
pub use config::EngineConfig;
pub use error::IndicatorError;
pub use models::*;

// Error handling
pub type Result<T> = std::result::Result<T, IndicatorError>;
