use std::sync::Arc;

use crate::api::Exchange;
use crate::error::ExchangeError;
use crate::execution::sizer::{precision_from_min_size, FALLBACK_PRECISION};
use crate::models::{OrderRequest, OrderSide, OrderType, PlacedOrder, TimeInForce};

/// Submits and cancels orders through the exchange capability. Exactly one
/// network call per placement; failures are returned typed for the cycle to
/// log and absorb — never retried here.
pub struct OrderManager<E> {
    exchange: Arc<E>,
}

impl<E: Exchange> OrderManager<E> {
    pub fn new(exchange: Arc<E>) -> Self {
        Self { exchange }
    }

    /// Build and submit a GTC limit order.
    pub async fn place_order(
        &self,
        product: &str,
        side: OrderSide,
        size: f64,
        price: f64,
    ) -> Result<PlacedOrder, ExchangeError> {
        let request = OrderRequest {
            product: product.to_string(),
            side,
            order_type: OrderType::Limit,
            size,
            price,
            time_in_force: TimeInForce::Gtc,
        };

        let placed = self.exchange.submit_order(&request).await?;
        tracing::info!(
            "placed {:?} limit order {} (size {} @ {})",
            side,
            placed.id,
            size,
            price
        );
        Ok(placed)
    }

    /// Cancel every open GTC order on the product. Returns the number of
    /// orders cancelled. Not invoked by the cycle unless
    /// `cancel_stale_before_order` is configured.
    pub async fn cancel_stale_orders(&self, product: &str) -> Result<usize, ExchangeError> {
        let open_orders = self.exchange.list_open_orders(product).await?;

        let mut cancelled = 0;
        for order in open_orders {
            if order.time_in_force == TimeInForce::Gtc {
                self.exchange.cancel_order(&order.id).await?;
                tracing::info!("cancelled stale order {} on {}", order.id, product);
                cancelled += 1;
            }
        }
        Ok(cancelled)
    }

    /// Quantity precision for the product, from the minimum-size metadata.
    /// Any lookup failure falls back to a fixed precision instead of
    /// blocking the order.
    pub async fn product_precision(&self, product: &str) -> usize {
        match self.exchange.product_metadata(product).await {
            Ok(metadata) => precision_from_min_size(&metadata.base_min_size),
            Err(err) => {
                tracing::warn!(
                    "metadata lookup for {} failed ({}), using {} decimals",
                    product,
                    err,
                    FALLBACK_PRECISION
                );
                FALLBACK_PRECISION
            }
        }
    }
}
