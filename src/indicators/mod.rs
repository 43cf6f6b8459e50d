// Technical indicators module
// Pure functions over closing prices, oldest first. Every function returns
// None (never a sentinel value) when the window exceeds the history.

pub mod bollinger;
pub mod macd;
pub mod moving_average;
pub mod rsi;

pub use bollinger::{bollinger_bands, BollingerBands};
pub use macd::{calculate_macd, Macd};
pub use moving_average::{calculate_ema, calculate_sma};
pub use rsi::calculate_rsi;

use crate::config::BotConfig;
use crate::models::IndicatorSnapshot;

/// Compute every configured indicator over one cycle's closing prices.
pub fn compute_snapshot(closes: &[f64], config: &BotConfig) -> IndicatorSnapshot {
    let macd = calculate_macd(closes, config.macd_fast, config.macd_slow, config.macd_signal);
    let bands = bollinger_bands(closes, config.bb_period, config.bb_stddev);

    IndicatorSnapshot {
        sma_fast: calculate_sma(closes, config.sma_fast),
        sma_slow: calculate_sma(closes, config.sma_slow),
        rsi: calculate_rsi(closes, config.rsi_period),
        macd_line: macd.line,
        macd_signal: macd.signal,
        bb_mean: bands.map(|b| b.mean),
        bb_upper: bands.map(|b| b.upper),
        bb_lower: bands.map(|b| b.lower),
    }
}
