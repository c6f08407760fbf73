//! Database models for exchange rates.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use subtrack_core::errors::{Error, Result};
use subtrack_core::fx::{Currency, ExchangeRate};

/// Database model for the current rate of one currency
#[derive(Queryable, Insertable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::exchange_rates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ExchangeRateDB {
    pub currency_code: String,
    pub rate_to_rub: String,
    pub updated_at: NaiveDateTime,
}

impl From<&ExchangeRate> for ExchangeRateDB {
    fn from(rate: &ExchangeRate) -> Self {
        Self {
            currency_code: rate.currency_code.as_str().to_string(),
            rate_to_rub: rate.rate_to_rub.to_string(),
            updated_at: rate.updated_at.naive_utc(),
        }
    }
}

impl TryFrom<ExchangeRateDB> for ExchangeRate {
    type Error = Error;

    fn try_from(db: ExchangeRateDB) -> Result<Self> {
        let currency = Currency::from_str(&db.currency_code)?;
        let rate = Decimal::from_str(&db.rate_to_rub)?;
        Ok(ExchangeRate::new(
            currency,
            rate,
            Utc.from_utc_datetime(&db.updated_at),
        )?)
    }
}
