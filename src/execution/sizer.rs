use crate::error::SizingError;

/// Precision used when the product metadata lookup fails.
pub const FALLBACK_PRECISION: usize = 6;

/// Number of meaningful decimal digits in a minimum-size string.
///
/// Exchange metadata pads with trailing zeros ("0.01000000" means two
/// decimals of precision); a string without a decimal point means whole
/// units.
pub fn precision_from_min_size(min_size: &str) -> usize {
    match min_size.trim().split_once('.') {
        Some((_, fraction)) => fraction.trim_end_matches('0').len(),
        None => 0,
    }
}

/// Convert a notional quote amount into a base quantity at `precision`
/// decimal digits.
///
/// A size that rounds to zero is a valid (degenerate) result; only a price
/// that would poison the division is an error.
pub fn size_order(notional: f64, price: f64, precision: usize) -> Result<f64, SizingError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(SizingError::InvalidPrice(price));
    }

    let factor = 10f64.powi(precision as i32);
    Ok(((notional / price) * factor).round() / factor)
}
