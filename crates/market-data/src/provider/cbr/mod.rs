//! Central Bank of Russia exchange-rate provider.
//!
//! Reads the daily JSON mirror of the official CBR rates. Every entry is the
//! RUB price of `Nominal` units of the currency, so the per-unit rate is
//! `Value / Nominal`.

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::RateQuote;
use crate::provider::ExchangeRateProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "CBR";

/// Public daily rates feed
pub const DEFAULT_CBR_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Daily feed document; only the currency map is read.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DailyRatesResponse {
    valute: HashMap<String, ValuteEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ValuteEntry {
    char_code: String,
    nominal: u32,
    value: Decimal,
}

/// Central Bank of Russia rate provider.
///
/// # Example
///
/// ```ignore
/// use subtrack_market_data::CbrProvider;
///
/// let provider = CbrProvider::new();
/// let quotes = provider.fetch_latest(&["USD", "EUR"]).await?;
/// ```
pub struct CbrProvider {
    client: Client,
    url: String,
}

impl CbrProvider {
    /// Provider for the public feed with the default timeout.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_CBR_URL, REQUEST_TIMEOUT)
    }

    /// Provider for a custom feed URL and request timeout.
    pub fn with_config(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
        }
    }

    async fn fetch(&self) -> Result<String, MarketDataError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::ProviderError {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })
    }
}

impl Default for CbrProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts quotes for `currency_codes` from a daily feed document.
///
/// Requested codes missing from the document are skipped with a debug log.
pub fn parse_daily_rates(
    body: &str,
    currency_codes: &[&str],
) -> Result<Vec<RateQuote>, MarketDataError> {
    let parsed: DailyRatesResponse =
        serde_json::from_str(body).map_err(|e| MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("Unreadable response: {}", e),
        })?;

    let mut quotes = Vec::with_capacity(currency_codes.len());
    for code in currency_codes {
        let entry = parsed
            .valute
            .values()
            .find(|entry| entry.char_code.eq_ignore_ascii_case(code));

        match entry {
            Some(entry) => quotes.push(RateQuote {
                currency_code: entry.char_code.clone(),
                value: entry.value,
                nominal: entry.nominal,
            }),
            None => log::debug!("{} feed has no rate for {}", PROVIDER_ID, code),
        }
    }
    Ok(quotes)
}

#[async_trait]
impl ExchangeRateProvider for CbrProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_latest(
        &self,
        currency_codes: &[&str],
    ) -> Result<Vec<RateQuote>, MarketDataError> {
        if currency_codes.is_empty() {
            return Ok(Vec::new());
        }

        let body = self.fetch().await?;
        let quotes = parse_daily_rates(&body, currency_codes)?;
        log::debug!(
            "{} returned {} of {} requested rate(s)",
            PROVIDER_ID,
            quotes.len(),
            currency_codes.len()
        );
        Ok(quotes)
    }
}
