use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fx_errors::FxError;
use super::Currency;
use subtrack_market_data::RateQuote;

/// Current rate of one foreign currency against the reporting currency.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub currency_code: Currency,
    #[serde(serialize_with = "serialize_decimal_6")]
    pub rate_to_rub: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl ExchangeRate {
    /// Builds a rate record, rejecting the reporting currency and
    /// non-positive rates.
    pub fn new(
        currency_code: Currency,
        rate_to_rub: Decimal,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, FxError> {
        if currency_code.is_reporting() {
            return Err(FxError::UnsupportedCurrency(format!(
                "{} is the reporting currency and has no stored rate",
                currency_code
            )));
        }
        if rate_to_rub <= Decimal::ZERO {
            return Err(FxError::InvalidRate(format!(
                "{} rate must be positive, got {}",
                currency_code, rate_to_rub
            )));
        }
        Ok(Self {
            currency_code,
            rate_to_rub,
            updated_at,
        })
    }

    /// Converts a provider quote into a per-unit rate.
    ///
    /// Quotes may be expressed per N units (e.g. 100 JPY), so the rate is
    /// `value / nominal`.
    pub fn from_quote(quote: &RateQuote, fetched_at: DateTime<Utc>) -> Result<Self, FxError> {
        let currency_code: Currency = quote
            .currency_code
            .parse()
            .map_err(|_| FxError::UnsupportedCurrency(quote.currency_code.clone()))?;

        if quote.nominal == 0 {
            return Err(FxError::InvalidRate(format!(
                "{} quote has zero nominal",
                quote.currency_code
            )));
        }

        Self::new(
            currency_code,
            quote.value / Decimal::from(quote.nominal),
            fetched_at,
        )
    }
}

fn serialize_decimal_6<S>(decimal: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let rounded = decimal.round_dp(6);
    serializer.serialize_str(&rounded.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn fetched_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_from_quote_divides_by_nominal() {
        let quote = RateQuote {
            currency_code: "USD".to_string(),
            value: dec!(9150),
            nominal: 100,
        };
        let rate = ExchangeRate::from_quote(&quote, fetched_at()).unwrap();
        assert_eq!(rate.currency_code, Currency::Usd);
        assert_eq!(rate.rate_to_rub, dec!(91.5));
        assert_eq!(rate.updated_at, fetched_at());
    }

    #[test]
    fn test_from_quote_rejects_bad_input() {
        let zero_nominal = RateQuote {
            currency_code: "EUR".to_string(),
            value: dec!(99.1),
            nominal: 0,
        };
        assert!(matches!(
            ExchangeRate::from_quote(&zero_nominal, fetched_at()),
            Err(FxError::InvalidRate(_))
        ));

        let unknown = RateQuote {
            currency_code: "JPY".to_string(),
            value: dec!(60.2),
            nominal: 100,
        };
        assert!(matches!(
            ExchangeRate::from_quote(&unknown, fetched_at()),
            Err(FxError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_new_rejects_reporting_currency() {
        assert!(ExchangeRate::new(Currency::Rub, dec!(1), fetched_at()).is_err());
        assert!(ExchangeRate::new(Currency::Usd, dec!(0), fetched_at()).is_err());
    }
}
