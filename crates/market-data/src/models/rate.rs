use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One exchange-rate quote as published by a provider.
///
/// `value` is the price of `nominal` units of `currency_code` in the
/// provider's base currency, so the per-unit rate is `value / nominal`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RateQuote {
    /// Currency code exactly as received (e.g. "USD")
    pub currency_code: String,
    pub value: Decimal,
    pub nominal: u32,
}
