use super::fx_errors::FxError;
use super::fx_model::ExchangeRate;
use super::fx_traits::{FxRepositoryTrait, FxServiceTrait};
use super::rate_cache::RateCache;
use crate::constants::TRACKED_CURRENCIES;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use subtrack_market_data::{ExchangeRateProvider, RateQuote};

/// Serves exchange rates from storage and refreshes them from the rate
/// source once they go stale.
#[derive(Clone)]
pub struct FxService {
    repository: Arc<dyn FxRepositoryTrait>,
    provider: Arc<dyn ExchangeRateProvider>,
}

impl FxService {
    pub fn new(
        repository: Arc<dyn FxRepositoryTrait>,
        provider: Arc<dyn ExchangeRateProvider>,
    ) -> Self {
        Self {
            repository,
            provider,
        }
    }

    /// Stored rates; a read failure is logged and treated as an empty cache.
    fn load_cache(&self) -> RateCache {
        match self.repository.get_exchange_rates() {
            Ok(records) => RateCache::new(records),
            Err(e) => {
                log::error!("Failed to read cached exchange rates: {}", e);
                RateCache::empty()
            }
        }
    }

    /// Turns provider quotes into rate records, skipping unusable ones.
    fn quotes_to_rates(quotes: &[RateQuote], fetched_at: DateTime<Utc>) -> Vec<ExchangeRate> {
        quotes
            .iter()
            .filter_map(|quote| match ExchangeRate::from_quote(quote, fetched_at) {
                Ok(rate) => Some(rate),
                Err(e) => {
                    log::warn!("Skipping quote from rate source: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Writes every rate; failures are logged and do not undo the others.
    async fn persist_rates(&self, rates: &[ExchangeRate]) {
        let writes = rates
            .iter()
            .cloned()
            .map(|rate| self.repository.upsert_exchange_rate(rate));

        for (rate, result) in rates.iter().zip(join_all(writes).await) {
            if let Err(e) = result {
                log::warn!(
                    "Failed to store {} exchange rate, next refresh will retry: {}",
                    rate.currency_code,
                    e
                );
            }
        }
    }

    async fn fetch_rates(&self, now: DateTime<Utc>) -> Result<Vec<ExchangeRate>> {
        let codes: Vec<&str> = TRACKED_CURRENCIES.iter().map(|c| c.as_str()).collect();
        let quotes = self.provider.fetch_latest(&codes).await?;
        let rates = Self::quotes_to_rates(&quotes, now);

        if rates.is_empty() {
            return Err(FxError::FetchError(format!(
                "{} returned no usable rates for {:?}",
                self.provider.id(),
                codes
            ))
            .into());
        }
        Ok(rates)
    }

    /// Fetches, persists and returns fresh rates stamped with `now`.
    pub async fn refresh_rates_at(&self, now: DateTime<Utc>) -> Result<RateCache> {
        let rates = self.fetch_rates(now).await?;
        self.persist_rates(&rates).await;
        log::info!(
            "Refreshed {} exchange rate(s) from {}",
            rates.len(),
            self.provider.id()
        );
        Ok(RateCache::new(rates))
    }

    /// Cache policy evaluated at `now`.
    ///
    /// Fresh cache is returned as-is. Otherwise the rate source is queried;
    /// if that fails the previous cache (stale or empty) keeps serving.
    pub async fn current_rates_at(&self, now: DateTime<Utc>) -> RateCache {
        let cached = self.load_cache();

        if !cached.is_empty() && !cached.is_stale_at(now) {
            return cached;
        }

        match self.refresh_rates_at(now).await {
            Ok(fresh) => fresh,
            Err(e) => {
                if cached.is_empty() {
                    log::error!("Exchange rate refresh failed and no cached rates exist: {}", e);
                } else {
                    log::error!(
                        "Exchange rate refresh failed, serving cached rates from {:?}: {}",
                        cached.newest_updated_at(),
                        e
                    );
                }
                cached
            }
        }
    }
}

#[async_trait]
impl FxServiceTrait for FxService {
    async fn get_current_rates(&self) -> RateCache {
        self.current_rates_at(Utc::now()).await
    }

    async fn refresh_rates(&self) -> Result<RateCache> {
        self.refresh_rates_at(Utc::now()).await
    }

    fn get_cached_rates(&self) -> Result<RateCache> {
        Ok(RateCache::new(self.repository.get_exchange_rates()?))
    }
}
