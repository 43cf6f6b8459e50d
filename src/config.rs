use std::str::FromStr;

use anyhow::Context;

/// Immutable bot configuration, read once at startup and shared read-only
/// with every component. Defaults match an unconfigured deployment.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub product_id: String,
    /// Candle granularity in seconds.
    pub granularity_secs: u64,
    /// How many bars of history to request per cycle.
    pub historic_bars: usize,
    pub sma_fast: usize,
    pub sma_slow: usize,
    pub rsi_period: usize,
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_stddev: f64,
    /// Fixed notional per order, in quote currency.
    pub order_dollar_amount: f64,
    /// Gates Buy orders. The fast/slow naming is a convention carried over
    /// from the deployment env vars, not tied to trade direction.
    pub fast_trade_enabled: bool,
    /// Gates Sell orders.
    pub slow_trade_enabled: bool,
    /// When set, open GTC orders on the product are cancelled before a new
    /// order is submitted. Off by default.
    pub cancel_stale_before_order: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            product_id: "BTC-USD".to_string(),
            granularity_secs: 60,
            historic_bars: 240,
            sma_fast: 20,
            sma_slow: 50,
            rsi_period: 14,
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_stddev: 2.0,
            order_dollar_amount: 100.0,
            fast_trade_enabled: true,
            slow_trade_enabled: true,
            cancel_stale_before_order: false,
        }
    }
}

impl BotConfig {
    /// Build the configuration from environment variables, falling back to
    /// the documented default for each unset variable. A set-but-unparsable
    /// variable is an error rather than a silent default.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            product_id: std::env::var("PRODUCT_ID").unwrap_or(defaults.product_id),
            granularity_secs: env_parse("GRANULARITY", defaults.granularity_secs)?,
            historic_bars: env_parse("HISTORIC_BARS", defaults.historic_bars)?,
            sma_fast: env_parse("SMA_FAST", defaults.sma_fast)?,
            sma_slow: env_parse("SMA_SLOW", defaults.sma_slow)?,
            rsi_period: env_parse("RSI_PERIOD", defaults.rsi_period)?,
            rsi_oversold: env_parse("RSI_OVERSOLD", defaults.rsi_oversold)?,
            rsi_overbought: env_parse("RSI_OVERBOUGHT", defaults.rsi_overbought)?,
            macd_fast: env_parse("MACD_FAST", defaults.macd_fast)?,
            macd_slow: env_parse("MACD_SLOW", defaults.macd_slow)?,
            macd_signal: env_parse("MACD_SIGNAL", defaults.macd_signal)?,
            bb_period: env_parse("BB_PERIOD", defaults.bb_period)?,
            bb_stddev: env_parse("BB_STDDEV", defaults.bb_stddev)?,
            order_dollar_amount: env_parse(
                "ORDER_DOLLAR_AMOUNT",
                defaults.order_dollar_amount,
            )?,
            fast_trade_enabled: env_flag("FAST_TRADE_ENABLED", defaults.fast_trade_enabled),
            slow_trade_enabled: env_flag("SLOW_TRADE_ENABLED", defaults.slow_trade_enabled),
            cancel_stale_before_order: env_flag(
                "CANCEL_STALE_ORDERS",
                defaults.cancel_stale_before_order,
            ),
        })
    }
}

fn env_parse<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw),
        Err(_) => default,
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BotConfig::default();
        assert_eq!(config.product_id, "BTC-USD");
        assert_eq!(config.granularity_secs, 60);
        assert_eq!(config.historic_bars, 240);
        assert_eq!(config.sma_fast, 20);
        assert_eq!(config.sma_slow, 50);
        assert_eq!(config.rsi_period, 14);
        assert_eq!(config.rsi_oversold, 30.0);
        assert_eq!(config.rsi_overbought, 70.0);
        assert_eq!((config.macd_fast, config.macd_slow, config.macd_signal), (12, 26, 9));
        assert_eq!(config.bb_period, 20);
        assert_eq!(config.bb_stddev, 2.0);
        assert_eq!(config.order_dollar_amount, 100.0);
        assert!(config.fast_trade_enabled);
        assert!(config.slow_trade_enabled);
        assert!(!config.cancel_stale_before_order);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag("1"));
        assert!(parse_flag("yes"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("enabled"));
    }
}
