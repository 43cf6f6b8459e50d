/// Calculate Relative Strength Index (RSI)
///
/// Momentum oscillator in [0, 100] built from average gains vs. losses.
/// Gains and losses are filtered into separate lists before averaging, so
/// the two lookback windows do not necessarily cover the same calendar
/// span. That filtering is part of the signal contract.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
    if prices.len() < period + 1 {
        return None;
    }

    let mut gains = Vec::new();
    let mut losses = Vec::new();

    for pair in prices.windows(2) {
        let delta = pair[1] - pair[0];
        if delta > 0.0 {
            gains.push(delta);
        } else if delta < 0.0 {
            losses.push(-delta);
        }
    }

    let avg_gain = tail_average(&gains, period);
    let avg_loss = tail_average(&losses, period);

    // No losses in the window means maximum strength; an all-gains window
    // reports exactly 100, never more.
    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// Sum of the last `period` entries divided by `period`. A list shorter
/// than `period` still divides by `period`; an empty list averages to zero.
fn tail_average(values: &[f64], period: usize) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let start = values.len().saturating_sub(period);
    values[start..].iter().sum::<f64>() / period as f64
}
