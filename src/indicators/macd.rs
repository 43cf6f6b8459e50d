use crate::indicators::{calculate_ema, calculate_sma};

/// MACD reading for the latest price.
///
/// All fields are None with fewer than `slow` prices. The signal line can
/// lag further behind: it needs `signal_period` MACD history points, so it
/// (and the histogram) may stay None while the line is already defined.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Macd {
    pub line: Option<f64>,
    pub signal: Option<f64>,
    pub histogram: Option<f64>,
}

/// Calculate Moving Average Convergence Divergence (MACD)
///
/// The line is the fast EMA minus the slow EMA over the full series. The
/// signal line smooths the line's own history, which is rebuilt here by
/// recomputing both EMAs on every prefix ending at `slow..len`. Quadratic
/// in series length, but those per-prefix values are the numeric contract
/// and the window is a few hundred bars at most.
pub fn calculate_macd(prices: &[f64], fast: usize, slow: usize, signal_period: usize) -> Macd {
    if prices.len() < slow {
        return Macd::default();
    }

    let line = match (calculate_ema(prices, fast), calculate_ema(prices, slow)) {
        (Some(ema_fast), Some(ema_slow)) => ema_fast - ema_slow,
        _ => return Macd::default(),
    };

    let mut history = Vec::with_capacity(prices.len() - slow);
    for i in slow..prices.len() {
        let prefix = &prices[..=i];
        if let (Some(ema_fast), Some(ema_slow)) =
            (calculate_ema(prefix, fast), calculate_ema(prefix, slow))
        {
            history.push(ema_fast - ema_slow);
        }
    }

    let signal = calculate_sma(&history, signal_period);

    Macd {
        line: Some(line),
        signal,
        histogram: signal.map(|s| line - s),
    }
}
