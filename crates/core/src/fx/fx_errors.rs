use thiserror::Error;

use super::Currency;

/// Errors raised by the exchange-rate layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FxError {
    #[error("Exchange rate not found for {0}")]
    RateNotFound(Currency),

    #[error("Unsupported currency code: {0}")]
    UnsupportedCurrency(String),

    #[error("Invalid exchange rate: {0}")]
    InvalidRate(String),

    #[error("Fetch error: {0}")]
    FetchError(String),
}
