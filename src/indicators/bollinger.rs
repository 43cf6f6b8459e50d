/// Bollinger band envelope around the trailing-window mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub mean: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Calculate Bollinger Bands over the last `period` prices.
///
/// Uses the population standard deviation (divisor `period`, not
/// `period - 1`). A zero-variance window collapses the envelope onto the
/// mean.
pub fn bollinger_bands(prices: &[f64], period: usize, stddev_mult: f64) -> Option<BollingerBands> {
    if prices.len() < period {
        return None;
    }

    let window = &prices[prices.len() - period..];
    let mean = window.iter().sum::<f64>() / period as f64;
    let variance = window.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / period as f64;
    let std = variance.sqrt();

    Some(BollingerBands {
        mean,
        upper: mean + stddev_mult * std,
        lower: mean - stddev_mult * std,
    })
}
