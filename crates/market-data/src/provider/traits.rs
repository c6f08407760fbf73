//! Exchange-rate provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::RateQuote;

/// Trait for exchange-rate sources.
///
/// Implement this trait to add support for a new rate source.
#[async_trait]
pub trait ExchangeRateProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "CBR". Used for logging.
    fn id(&self) -> &'static str;

    /// Fetch the latest quotes for the given currency codes.
    ///
    /// Codes the source does not publish are left out of the result rather
    /// than reported as errors.
    async fn fetch_latest(&self, currency_codes: &[&str])
        -> Result<Vec<RateQuote>, MarketDataError>;
}
