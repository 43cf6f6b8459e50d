pub mod coinbase;

pub use coinbase::CoinbaseClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::ExchangeError;
use crate::models::{Candle, OpenOrder, OrderRequest, PlacedOrder, ProductMetadata};

/// Capability surface the core consumes from an exchange. The live
/// implementation is [`CoinbaseClient`]; tests substitute their own.
#[async_trait]
pub trait Exchange: Send + Sync {
    /// Historic candles for `[start, end]` at `granularity` seconds,
    /// ordered oldest first.
    async fn fetch_candles(
        &self,
        product: &str,
        granularity: u64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Candle>, ExchangeError>;

    async fn product_metadata(&self, product: &str) -> Result<ProductMetadata, ExchangeError>;

    async fn list_open_orders(&self, product: &str) -> Result<Vec<OpenOrder>, ExchangeError>;

    async fn cancel_order(&self, order_id: &str) -> Result<(), ExchangeError>;

    async fn submit_order(&self, request: &OrderRequest) -> Result<PlacedOrder, ExchangeError>;
}
