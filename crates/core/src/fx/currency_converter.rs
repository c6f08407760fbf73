use rust_decimal::Decimal;
use std::collections::HashMap;

use super::fx_errors::FxError;
use super::fx_model::ExchangeRate;
use super::rate_cache::RateCache;
use super::Currency;

/// Converts amounts into the reporting currency from a snapshot of rates.
///
/// Holds plain values only; building one per request is cheap and there is
/// no shared state between callers.
#[derive(Debug, Clone, Default)]
pub struct CurrencyConverter {
    rates: HashMap<Currency, Decimal>,
}

impl CurrencyConverter {
    /// Indexes rate records by currency. If a code appears more than once,
    /// the most recently updated record wins.
    pub fn new(exchange_rates: &[ExchangeRate]) -> Self {
        let cache = RateCache::new(exchange_rates.to_vec());
        Self::from(&cache)
    }

    pub fn has_rate(&self, currency: Currency) -> bool {
        currency.is_reporting() || self.rates.contains_key(&currency)
    }

    /// Strict conversion: a missing rate is an error.
    pub fn convert(&self, amount: Decimal, from_currency: Currency) -> Result<Decimal, FxError> {
        if from_currency.is_reporting() {
            return Ok(amount);
        }

        self.rates
            .get(&from_currency)
            .map(|rate| amount * *rate)
            .ok_or(FxError::RateNotFound(from_currency))
    }

    /// Lenient conversion used for totals: a missing rate degrades to the
    /// unconverted amount and is logged, never returned as an error.
    pub fn convert_or_pass_through(&self, amount: Decimal, from_currency: Currency) -> Decimal {
        match self.convert(amount, from_currency) {
            Ok(converted) => converted,
            Err(e) => {
                log::warn!("{}; leaving amount {} unconverted", e, amount);
                amount
            }
        }
    }
}

impl From<&RateCache> for CurrencyConverter {
    fn from(cache: &RateCache) -> Self {
        Self {
            rates: cache
                .iter()
                .map(|r| (r.currency_code, r.rate_to_rub))
                .collect(),
        }
    }
}

/// Converts `amount` from `from_currency` into the reporting currency.
///
/// The reporting currency passes through unchanged. When no matching rate is
/// found the original amount is returned and a warning is logged, so one
/// missing rate never blocks a total.
pub fn convert_to_reporting_currency(
    amount: Decimal,
    from_currency: Currency,
    rates: &[ExchangeRate],
) -> Decimal {
    CurrencyConverter::new(rates).convert_or_pass_through(amount, from_currency)
}
