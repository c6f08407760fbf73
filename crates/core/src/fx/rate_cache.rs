//! Time-bound cache of exchange rates and its freshness policy.

use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;

use super::fx_model::ExchangeRate;
use super::Currency;
use crate::constants::RATE_FRESHNESS_HOURS;

/// Returns true if rates last updated at `last_updated` must be refreshed at `now`.
///
/// Never-fetched rates are stale. The 24h window is inclusive: a rate exactly
/// 24 hours old is stale.
pub fn is_stale_at(last_updated: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last_updated {
        None => true,
        Some(ts) => now - ts >= Duration::hours(RATE_FRESHNESS_HOURS),
    }
}

/// [`is_stale_at`] against the current wall clock.
pub fn is_stale(last_updated: Option<DateTime<Utc>>) -> bool {
    is_stale_at(last_updated, Utc::now())
}

/// The most recent rate per currency code.
///
/// Built from stored records; when several records share a code the newest
/// one wins, so the cache always holds at most one rate per currency.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateCache {
    rates: BTreeMap<Currency, ExchangeRate>,
}

impl RateCache {
    pub fn new(records: Vec<ExchangeRate>) -> Self {
        let mut rates: BTreeMap<Currency, ExchangeRate> = BTreeMap::new();
        for record in records {
            if record.currency_code.is_reporting() {
                log::warn!("Ignoring stored rate for reporting currency {}", record.currency_code);
                continue;
            }
            match rates.get(&record.currency_code) {
                Some(existing) if existing.updated_at >= record.updated_at => {}
                _ => {
                    rates.insert(record.currency_code, record);
                }
            }
        }
        Self { rates }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn get(&self, currency: Currency) -> Option<&ExchangeRate> {
        self.rates.get(&currency)
    }

    /// Timestamp of the newest record, which drives the freshness check.
    pub fn newest_updated_at(&self) -> Option<DateTime<Utc>> {
        self.rates.values().map(|r| r.updated_at).max()
    }

    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        is_stale_at(self.newest_updated_at(), now)
    }

    /// Rates ordered newest first.
    pub fn to_vec(&self) -> Vec<ExchangeRate> {
        let mut out: Vec<ExchangeRate> = self.rates.values().cloned().collect();
        out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExchangeRate> {
        self.rates.values()
    }
}

impl From<Vec<ExchangeRate>> for RateCache {
    fn from(records: Vec<ExchangeRate>) -> Self {
        RateCache::new(records)
    }
}
