//! Subscription domain models.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::billing::{is_payment_date_near, monthly_equivalent_cost, next_payment_date, BillingPeriod};
use crate::errors::{Result, ValidationError};
use crate::fx::Currency;

/// Domain model representing a tracked subscription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub name: String,
    /// Optional reference into an external service catalog
    pub service_id: Option<i64>,
    pub cost: Decimal,
    pub currency: Currency,
    pub period: BillingPeriod,
    /// Recurrence anchor; may lie in the future
    pub start_date: NaiveDate,
    pub active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Subscription {
    pub fn monthly_cost(&self) -> Decimal {
        monthly_equivalent_cost(self.cost, self.period)
    }

    pub fn next_payment_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        next_payment_date(self.start_date, self.period, today)
    }
}

/// Input model for creating a new subscription.
///
/// Currency and period arrive as raw strings and are checked by
/// [`NewSubscription::validate`] before anything is stored.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub id: Option<String>,
    pub name: String,
    pub service_id: Option<i64>,
    pub cost: Decimal,
    pub currency: String,
    pub period: String,
    pub start_date: NaiveDate,
    /// Defaults to active when omitted
    pub active: Option<bool>,
}

impl NewSubscription {
    /// Validates the payload and builds a subscription stamped with `now`.
    pub fn validate(self, now: NaiveDateTime) -> Result<Subscription> {
        let name = validate_name(&self.name)?;
        let cost = validate_cost(self.cost)?;
        let currency: Currency = self.currency.parse()?;
        let period: BillingPeriod = self.period.parse()?;

        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => uuid::Uuid::new_v4().to_string(),
        };

        Ok(Subscription {
            id,
            name,
            service_id: self.service_id,
            cost,
            currency,
            period,
            start_date: self.start_date,
            active: self.active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update; absent fields keep their stored value.
///
/// `service_id` distinguishes an absent field (`None`) from an explicit
/// `null` (`Some(None)`), which clears the stored reference.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub service_id: Option<Option<i64>>,
    pub cost: Option<Decimal>,
    pub currency: Option<String>,
    pub period: Option<String>,
    pub start_date: Option<NaiveDate>,
    /// `true` reactivates a soft-deleted subscription
    pub active: Option<bool>,
}

/// Maps a present field to `Some`, keeping `null` as `Some(None)`.
fn deserialize_present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl SubscriptionUpdate {
    /// Applies the update on top of `existing`, validating every supplied field.
    pub fn apply_to(self, existing: Subscription, now: NaiveDateTime) -> Result<Subscription> {
        let mut updated = existing;

        if let Some(name) = self.name {
            updated.name = validate_name(&name)?;
        }
        if let Some(service_id) = self.service_id {
            updated.service_id = service_id;
        }
        if let Some(cost) = self.cost {
            updated.cost = validate_cost(cost)?;
        }
        if let Some(currency) = self.currency {
            updated.currency = currency.parse()?;
        }
        if let Some(period) = self.period {
            updated.period = period.parse()?;
        }
        if let Some(start_date) = self.start_date {
            updated.start_date = start_date;
        }
        if let Some(active) = self.active {
            updated.active = active;
        }

        updated.updated_at = now;
        Ok(updated)
    }
}

/// Subscription enriched with the schedule facts shown in listings
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub monthly_cost: Decimal,
    pub next_payment_date: Option<NaiveDate>,
    pub is_payment_near: bool,
}

impl SubscriptionView {
    pub fn new(subscription: Subscription, today: NaiveDate, near_threshold_days: i64) -> Self {
        let next_payment_date = subscription.next_payment_date(today);
        Self {
            monthly_cost: subscription.monthly_cost(),
            is_payment_near: is_payment_date_near(next_payment_date, near_threshold_days, today),
            next_payment_date,
            subscription,
        }
    }
}

fn validate_name(name: &str) -> std::result::Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("name".to_string()));
    }
    Ok(trimmed.to_string())
}

fn validate_cost(cost: Decimal) -> std::result::Result<Decimal, ValidationError> {
    if cost.is_sign_negative() && !cost.is_zero() {
        return Err(ValidationError::InvalidInput(format!(
            "Cost must not be negative, got {}",
            cost
        )));
    }
    Ok(cost)
}
