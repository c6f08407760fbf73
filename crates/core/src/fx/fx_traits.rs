use super::fx_model::ExchangeRate;
use super::rate_cache::RateCache;
use crate::errors::Result;
use async_trait::async_trait;

/// Trait defining the contract for exchange-rate storage.
#[async_trait]
pub trait FxRepositoryTrait: Send + Sync {
    /// All current rate rows, newest `updated_at` first.
    fn get_exchange_rates(&self) -> Result<Vec<ExchangeRate>>;

    /// Inserts or replaces the row for `rate.currency_code`.
    async fn upsert_exchange_rate(&self, rate: ExchangeRate) -> Result<ExchangeRate>;
}

/// Trait defining the contract for FX service operations.
#[async_trait]
pub trait FxServiceTrait: Send + Sync {
    /// Cached rates, refreshed from the rate source when stale.
    ///
    /// Never fails: fetch and store errors are logged and the best
    /// available data (possibly empty) is returned.
    async fn get_current_rates(&self) -> RateCache;

    /// Fetches from the rate source unconditionally and persists the result.
    async fn refresh_rates(&self) -> Result<RateCache>;

    /// Rates as currently stored, without contacting the rate source.
    fn get_cached_rates(&self) -> Result<RateCache>;
}
