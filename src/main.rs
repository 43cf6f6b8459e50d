use std::sync::Arc;

use chrono::Utc;
use tokio::time::{interval, Duration, MissedTickBehavior};

use coinbot::api::CoinbaseClient;
use coinbot::config::BotConfig;
use coinbot::cycle::StrategyCycle;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let config = BotConfig::from_env()?;
    tracing::info!(
        "starting trader for {} (granularity {}s, {} bars of history)",
        config.product_id,
        config.granularity_secs,
        config.historic_bars
    );

    let exchange = Arc::new(CoinbaseClient::from_env());
    let granularity = config.granularity_secs;
    let cycle = StrategyCycle::new(exchange, config);

    // One cycle per granularity interval, strictly sequential: a tick that
    // fires while a cycle is still running is delayed, never overlapped.
    let mut ticker = interval(Duration::from_secs(granularity));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        let outcome = cycle.run_cycle(Utc::now()).await;
        tracing::info!("cycle finished: {:?}", outcome);
    }
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("coinbot=info,coinbot::strategy=debug")
        .init();
}
