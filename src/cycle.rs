use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::api::Exchange;
use crate::config::BotConfig;
use crate::execution::{size_order, OrderManager};
use crate::indicators::compute_snapshot;
use crate::models::{OrderSide, PriceSeries, Signal};
use crate::strategy::evaluate_signal;

/// What one cycle invocation did. No error here is fatal: the scheduler's
/// next invocation is the only retry mechanism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleOutcome {
    /// Candle fetch failed or returned nothing; no side effects.
    DataUnavailable,
    /// No consensus (or trading gated off); no order placed.
    Hold,
    OrderPlaced { side: OrderSide, size: f64 },
    /// Consensus reached but the exchange rejected the order.
    OrderFailed,
}

/// One full strategy pass: fetch -> snapshot -> evaluate -> act. Holds no
/// state between invocations beyond the shared read-only config.
pub struct StrategyCycle<E> {
    exchange: Arc<E>,
    orders: OrderManager<E>,
    config: BotConfig,
}

impl<E: Exchange> StrategyCycle<E> {
    pub fn new(exchange: Arc<E>, config: BotConfig) -> Self {
        let orders = OrderManager::new(exchange.clone());
        Self {
            exchange,
            orders,
            config,
        }
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    /// Run one tick at `now`. The per-tick candle series and indicator
    /// snapshot live and die inside this call.
    pub async fn run_cycle(&self, now: DateTime<Utc>) -> CycleOutcome {
        let lookback =
            Duration::seconds(self.config.historic_bars as i64 * self.config.granularity_secs as i64);
        let start = now - lookback;

        let candles = match self
            .exchange
            .fetch_candles(&self.config.product_id, self.config.granularity_secs, start, now)
            .await
        {
            Ok(candles) => candles,
            Err(err) => {
                tracing::error!("failed to fetch historic candles: {err}");
                return CycleOutcome::DataUnavailable;
            }
        };

        let series = PriceSeries::new(candles);
        let Some(price) = series.latest_close() else {
            tracing::warn!("no candles returned, skipping this tick");
            return CycleOutcome::DataUnavailable;
        };

        let closes = series.closes();
        let snapshot = compute_snapshot(&closes, &self.config);
        let signal = evaluate_signal(&snapshot, price, &self.config);

        // Buy routes through the fast flag and Sell through the slow flag
        // by deployment convention; the mapping is not tied to direction.
        match signal {
            Signal::Buy if self.config.fast_trade_enabled => {
                self.execute(OrderSide::Buy, price).await
            }
            Signal::Sell if self.config.slow_trade_enabled => {
                self.execute(OrderSide::Sell, price).await
            }
            signal => {
                tracing::info!("no trade this cycle (signal {:?})", signal);
                CycleOutcome::Hold
            }
        }
    }

    async fn execute(&self, side: OrderSide, price: f64) -> CycleOutcome {
        let product = &self.config.product_id;

        if self.config.cancel_stale_before_order {
            if let Err(err) = self.orders.cancel_stale_orders(product).await {
                tracing::warn!("failed to cancel stale orders: {err}");
            }
        }

        let precision = self.orders.product_precision(product).await;
        let size = match size_order(self.config.order_dollar_amount, price, precision) {
            Ok(size) => size,
            Err(err) => {
                tracing::error!("cannot size order: {err}");
                return CycleOutcome::Hold;
            }
        };

        match self.orders.place_order(product, side, size, price).await {
            Ok(_) => CycleOutcome::OrderPlaced { side, size },
            Err(err) => {
                tracing::error!("order failed: {err}");
                CycleOutcome::OrderFailed
            }
        }
    }
}
