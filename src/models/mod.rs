use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV bar at a fixed granularity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub low: f64,
    pub high: f64,
    pub open: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ordered candle history, oldest first.
///
/// Never reordered after construction; every indicator window is a trailing
/// suffix of this sequence.
#[derive(Debug, Clone)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Closing prices, oldest first. The close is the trade price that
    /// drives every indicator.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    pub fn latest_close(&self) -> Option<f64> {
        self.candles.last().map(|c| c.close)
    }
}

/// Trading signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Limit,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    Gtc,
    Gtt,
    Ioc,
    Fok,
}

/// A fully specified limit order. Only constructed on a non-Hold signal.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub product: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub size: f64,
    pub price: f64,
    pub time_in_force: TimeInForce,
}

/// Product metadata returned by the exchange; `base_min_size` is a decimal
/// string such as "0.000016" from which quantity precision is derived.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductMetadata {
    pub base_min_size: String,
}

/// An order resting on the book, as listed by the exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenOrder {
    pub id: String,
    pub time_in_force: TimeInForce,
}

/// Acknowledgement returned by the exchange for a submitted order.
#[derive(Debug, Clone, Deserialize)]
pub struct PlacedOrder {
    pub id: String,
}

/// Per-cycle indicator readings. `None` marks an indicator whose window
/// exceeds the available history; sentinel numbers are never used.
///
/// Built fresh each cycle and dropped at cycle end.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IndicatorSnapshot {
    pub sma_fast: Option<f64>,
    pub sma_slow: Option<f64>,
    pub rsi: Option<f64>,
    pub macd_line: Option<f64>,
    pub macd_signal: Option<f64>,
    pub bb_mean: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}
