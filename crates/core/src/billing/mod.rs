//! Billing engine - periods, monthly normalization, payment schedule and
//! spend totals. Everything here is pure and synchronous.

mod period;
mod period_normalizer;
mod schedule;
mod totals;

pub use period::BillingPeriod;
pub use period_normalizer::monthly_equivalent_cost;
pub use schedule::{is_payment_date_near, next_payment_date, today};
pub use totals::{monthly_only_spend, summarize_spend, total_monthly_spend, SpendSummary};
