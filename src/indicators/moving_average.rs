/// Calculate Simple Moving Average (SMA)
///
/// Mean of the last `period` prices, or None with insufficient history.
pub fn calculate_sma(prices: &[f64], period: usize) -> Option<f64> {
    if prices.len() < period {
        return None;
    }

    let sum: f64 = prices[prices.len() - period..].iter().sum();
    Some(sum / period as f64)
}

/// Calculate Exponential Moving Average (EMA)
///
/// The running average is seeded with the first price of the whole series
/// and then smoothed forward over every later price. The seeding biases
/// early values toward the first sample; downstream signal values depend on
/// it, so it must not be swapped for an SMA warm-up.
pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
    if prices.len() < period {
        return None;
    }

    let k = 2.0 / (period as f64 + 1.0);

    let mut ema = prices[0];
    for price in &prices[1..] {
        ema = price * k + ema * (1.0 - k);
    }

    Some(ema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma() {
        let prices = vec![100.0, 102.0, 104.0, 106.0, 108.0];
        assert_eq!(calculate_sma(&prices, 5), Some(104.0));
    }

    #[test]
    fn test_sma_uses_trailing_window() {
        let prices = vec![1.0, 2.0, 3.0, 10.0, 20.0];
        assert_eq!(calculate_sma(&prices, 2), Some(15.0));
    }

    #[test]
    fn test_sma_insufficient_data() {
        let prices = vec![100.0, 102.0];
        assert!(calculate_sma(&prices, 5).is_none());
    }

    #[test]
    fn test_sma_constant_series_is_exact() {
        let prices = vec![42.5; 30];
        assert_eq!(calculate_sma(&prices, 20), Some(42.5));
    }

    #[test]
    fn test_ema_insufficient_data() {
        let prices = vec![100.0, 102.0];
        assert!(calculate_ema(&prices, 5).is_none());
    }

    #[test]
    fn test_ema_first_sample_seeding() {
        // k = 0.4; seed 100, then three zeros: 100 -> 60 -> 36 -> 21.6
        let prices = vec![100.0, 0.0, 0.0, 0.0];
        let ema = calculate_ema(&prices, 4).unwrap();
        assert!((ema - 21.6).abs() < 1e-9);
    }

    #[test]
    fn test_ema_constant_series_is_exact() {
        let prices = vec![7.25; 40];
        assert_eq!(calculate_ema(&prices, 12), Some(7.25));
    }

    #[test]
    fn test_ema_weights_recent_prices() {
        let prices = vec![100.0, 102.0, 104.0, 106.0, 108.0, 110.0];
        let ema = calculate_ema(&prices, 5).unwrap();
        // k = 1/3 from the 100 seed: 100, 100.667, 101.778, 103.185,
        // 104.790, 106.527
        assert!((ema - 106.5267489711934).abs() < 1e-9);
    }
}
