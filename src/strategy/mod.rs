// Signal fusion: strict conjunction over the indicator snapshot.
// No weighting, no partial scores. An undefined indicator makes its
// conjunct false, which forces Hold rather than an error.

use crate::config::BotConfig;
use crate::models::{IndicatorSnapshot, Signal};

/// Fuse one cycle's indicator snapshot and the latest close into a ternary
/// signal. Memoryless: prior cycles contribute nothing.
pub fn evaluate_signal(snapshot: &IndicatorSnapshot, price: f64, config: &BotConfig) -> Signal {
    tracing::debug!(
        "indicators: sma_fast={:?} sma_slow={:?} rsi={:?} macd={:?}/{:?} bb=[{:?}, {:?}] price={}",
        snapshot.sma_fast,
        snapshot.sma_slow,
        snapshot.rsi,
        snapshot.macd_line,
        snapshot.macd_signal,
        snapshot.bb_lower,
        snapshot.bb_upper,
        price
    );

    if all_bullish(snapshot, price, config) {
        tracing::info!("all bullish conditions active at price {price}");
        Signal::Buy
    } else if all_bearish(snapshot, price, config) {
        tracing::info!("all bearish conditions active at price {price}");
        Signal::Sell
    } else {
        Signal::Hold
    }
}

fn all_bullish(snapshot: &IndicatorSnapshot, price: f64, config: &BotConfig) -> bool {
    let conditions = [
        gt(snapshot.sma_fast, snapshot.sma_slow),
        matches!(snapshot.rsi, Some(rsi) if rsi < config.rsi_oversold),
        gt(snapshot.macd_line, snapshot.macd_signal),
        matches!(snapshot.bb_lower, Some(lower) if price < lower),
    ];
    conditions.iter().all(|&met| met)
}

fn all_bearish(snapshot: &IndicatorSnapshot, price: f64, config: &BotConfig) -> bool {
    let conditions = [
        gt(snapshot.sma_slow, snapshot.sma_fast),
        matches!(snapshot.rsi, Some(rsi) if rsi > config.rsi_overbought),
        gt(snapshot.macd_signal, snapshot.macd_line),
        matches!(snapshot.bb_upper, Some(upper) if price > upper),
    ];
    conditions.iter().all(|&met| met)
}

fn gt(left: Option<f64>, right: Option<f64>) -> bool {
    matches!((left, right), (Some(l), Some(r)) if l > r)
}
