//! Next-payment-date calculation.
//!
//! Each payment is the previous one plus one interval, starting from the
//! anchor. Month and year arithmetic is left to chrono, so a day missing from
//! the target month clamps to its last day and the clamped day carries
//! forward (Jan 31 -> Feb 29 -> Mar 29).

use chrono::{NaiveDate, Utc};

use super::period::BillingPeriod;

/// First payment date strictly after `today`.
///
/// - lifetime: `None`
/// - start in the future: the start date itself
/// - otherwise step one interval at a time from the start until past `today`
pub fn next_payment_date(
    start_date: NaiveDate,
    period: BillingPeriod,
    today: NaiveDate,
) -> Option<NaiveDate> {
    if !period.is_recurring() {
        return None;
    }

    if start_date > today {
        return Some(start_date);
    }

    // Each step adds at least seven days, so this ends after roughly
    // (today - start) / interval iterations.
    let mut candidate = start_date;
    while candidate <= today {
        candidate = period.advance(candidate, 1)?;
    }
    Some(candidate)
}

/// Whether `payment_date` falls within `threshold_days` from `today`, inclusive.
///
/// Unknown dates and dates in the past are never near.
pub fn is_payment_date_near(
    payment_date: Option<NaiveDate>,
    threshold_days: i64,
    today: NaiveDate,
) -> bool {
    match payment_date {
        Some(date) => {
            let days_until = (date - today).num_days();
            (0..=threshold_days).contains(&days_until)
        }
        None => false,
    }
}

/// Today's calendar date (UTC).
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
