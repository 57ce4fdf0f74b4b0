// Technical indicators module
// Implements SMA, EMA, MACD, RSI, Bollinger Bands and KDJ over aligned series

pub mod bollinger;
pub mod kdj;
pub mod macd;
pub mod moving_average;
pub mod rsi;
pub mod streaming;
pub mod validation;

pub use bollinger::{calculate_bollinger_bands, calculate_bollinger_bands_default};
pub use kdj::{calculate_kdj, calculate_kdj_strict};
pub use macd::{calculate_macd, calculate_macd_default};
pub use moving_average::{calculate_ema, calculate_sma};
pub use rsi::calculate_rsi;
pub use streaming::{
    HighLowClose, KdjValue, StreamingEma, StreamingIndicator, StreamingKdj, StreamingRsi,
    StreamingSma,
};
