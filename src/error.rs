use thiserror::Error;

/// Failures talking to the exchange. Every variant is recovered locally:
/// a failed candle fetch aborts the cycle with no side effects, a failed
/// order call is logged and left for the next scheduled cycle.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("exchange rejected request (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response payload: {0}")]
    InvalidResponse(String),

    #[error("authentication: {0}")]
    Auth(String),
}

/// Order sizing rejects prices a division would turn into Infinity or NaN.
#[derive(Debug, Error, PartialEq)]
pub enum SizingError {
    #[error("cannot size an order at price {0}")]
    InvalidPrice(f64),
}
