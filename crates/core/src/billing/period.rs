use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// How often a subscription is billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingPeriod {
    #[serde(rename = "weekly")]
    Weekly,
    #[serde(rename = "monthly")]
    Monthly,
    #[serde(rename = "3_months")]
    Quarterly,
    #[serde(rename = "6_months")]
    SemiAnnual,
    #[serde(rename = "yearly")]
    Yearly,
    /// One-time purchase; never recurs.
    #[serde(rename = "lifetime")]
    Lifetime,
}

impl BillingPeriod {
    pub const ALL: [BillingPeriod; 6] = [
        BillingPeriod::Weekly,
        BillingPeriod::Monthly,
        BillingPeriod::Quarterly,
        BillingPeriod::SemiAnnual,
        BillingPeriod::Yearly,
        BillingPeriod::Lifetime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingPeriod::Weekly => "weekly",
            BillingPeriod::Monthly => "monthly",
            BillingPeriod::Quarterly => "3_months",
            BillingPeriod::SemiAnnual => "6_months",
            BillingPeriod::Yearly => "yearly",
            BillingPeriod::Lifetime => "lifetime",
        }
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, BillingPeriod::Lifetime)
    }

    /// Calendar months in one interval; `None` for weekly and lifetime.
    fn months_per_interval(&self) -> Option<u32> {
        match self {
            BillingPeriod::Monthly => Some(1),
            BillingPeriod::Quarterly => Some(3),
            BillingPeriod::SemiAnnual => Some(6),
            BillingPeriod::Yearly => Some(12),
            BillingPeriod::Weekly | BillingPeriod::Lifetime => None,
        }
    }

    /// `anchor` shifted forward by `count` whole intervals.
    ///
    /// Month-based periods use calendar-aware addition, so a day that does not
    /// exist in the target month clamps to that month's last day
    /// (Jan 31 + 1 month = Feb 28/29). Returns `None` for lifetime or when the
    /// result is out of range.
    pub fn advance(&self, anchor: NaiveDate, count: u32) -> Option<NaiveDate> {
        match self {
            BillingPeriod::Lifetime => None,
            BillingPeriod::Weekly => anchor.checked_add_signed(Duration::weeks(i64::from(count))),
            _ => {
                let months = self.months_per_interval()?.checked_mul(count)?;
                anchor.checked_add_months(Months::new(months))
            }
        }
    }
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillingPeriod {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "weekly" => Ok(BillingPeriod::Weekly),
            "monthly" => Ok(BillingPeriod::Monthly),
            "3_months" | "quarterly" => Ok(BillingPeriod::Quarterly),
            "6_months" | "semiannual" => Ok(BillingPeriod::SemiAnnual),
            "yearly" => Ok(BillingPeriod::Yearly),
            "lifetime" => Ok(BillingPeriod::Lifetime),
            other => Err(ValidationError::InvalidInput(format!(
                "Unsupported billing period '{}'",
                other
            ))),
        }
    }
}
