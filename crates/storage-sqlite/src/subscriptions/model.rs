//! Database models for subscriptions.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use subtrack_core::errors::{Error, Result};
use subtrack_core::subscriptions::Subscription;

/// Database model for subscriptions
#[derive(
    Queryable, Insertable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone,
)]
#[diesel(table_name = crate::schema::subscriptions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct SubscriptionDB {
    pub id: String,
    pub name: String,
    pub service_id: Option<i64>,
    pub cost: String,
    pub currency: String,
    pub period: String,
    pub start_date: NaiveDate,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<&Subscription> for SubscriptionDB {
    fn from(domain: &Subscription) -> Self {
        Self {
            id: domain.id.clone(),
            name: domain.name.clone(),
            service_id: domain.service_id,
            cost: domain.cost.to_string(),
            currency: domain.currency.as_str().to_string(),
            period: domain.period.as_str().to_string(),
            start_date: domain.start_date,
            active: domain.active,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}

impl TryFrom<SubscriptionDB> for Subscription {
    type Error = Error;

    fn try_from(db: SubscriptionDB) -> Result<Self> {
        Ok(Self {
            cost: Decimal::from_str(&db.cost)?,
            currency: db.currency.parse()?,
            period: db.period.parse()?,
            id: db.id,
            name: db.name,
            service_id: db.service_id,
            start_date: db.start_date,
            active: db.active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
