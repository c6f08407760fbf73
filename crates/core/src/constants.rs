use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fx::Currency;

/// Currency every aggregate is reported in
pub const REPORTING_CURRENCY: Currency = Currency::Rub;

/// Currencies fetched from the rate source on refresh
pub const TRACKED_CURRENCIES: [Currency; 2] = [Currency::Usd, Currency::Eur];

/// Hours after which cached exchange rates are considered stale
pub const RATE_FRESHNESS_HOURS: i64 = 24;

/// Average number of weeks in a calendar month
pub const WEEKS_PER_MONTH: Decimal = dec!(4.33);

/// Days ahead within which a payment is flagged as "soon"
pub const DEFAULT_PAYMENT_NEAR_THRESHOLD_DAYS: i64 = 3;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;
