//! Spend aggregation over a collection of subscriptions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::period::BillingPeriod;
use crate::constants::{DISPLAY_DECIMAL_PRECISION, REPORTING_CURRENCY};
use crate::fx::{format_amount, Currency, CurrencyConverter, ExchangeRate, RateCache};
use crate::subscriptions::Subscription;

/// Sum of monthly-equivalent costs in the reporting currency.
///
/// Zero contributions (lifetime or free) are skipped. A missing rate leaves
/// that record's amount unconverted rather than failing the total.
pub fn total_monthly_spend(subscriptions: &[Subscription], rates: &[ExchangeRate]) -> Decimal {
    let converter = CurrencyConverter::new(rates);
    sum_converted(
        subscriptions.iter().map(|s| (s.monthly_cost(), s.currency)),
        &converter,
    )
}

/// Sum of costs of monthly-billed subscriptions only, in the reporting currency.
pub fn monthly_only_spend(subscriptions: &[Subscription], rates: &[ExchangeRate]) -> Decimal {
    let converter = CurrencyConverter::new(rates);
    sum_converted(
        subscriptions
            .iter()
            .filter(|s| s.period == BillingPeriod::Monthly)
            .map(|s| (s.cost, s.currency)),
        &converter,
    )
}

fn sum_converted(
    amounts: impl Iterator<Item = (Decimal, Currency)>,
    converter: &CurrencyConverter,
) -> Decimal {
    amounts
        .filter(|(amount, _)| !amount.is_zero())
        .map(|(amount, currency)| converter.convert_or_pass_through(amount, currency))
        .sum()
}

/// Dashboard figures for a set of subscriptions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpendSummary {
    pub total_monthly: Decimal,
    pub monthly_only: Decimal,
    pub reporting_currency: Currency,
    /// Currencies that had no rate and were summed unconverted
    pub unconverted_currencies: Vec<Currency>,
    /// True when any foreign-currency amount took part in the totals
    pub is_approximate: bool,
    pub total_monthly_display: String,
    pub monthly_only_display: String,
    pub rates_updated_at: Option<DateTime<Utc>>,
    pub subscription_count: usize,
}

/// Computes both totals and records how much of them is approximate.
pub fn summarize_spend(subscriptions: &[Subscription], rates: &RateCache) -> SpendSummary {
    let rate_list = rates.to_vec();
    let total_monthly = total_monthly_spend(subscriptions, &rate_list);
    let monthly_only = monthly_only_spend(subscriptions, &rate_list);

    let foreign: BTreeSet<Currency> = subscriptions
        .iter()
        .filter(|s| !s.currency.is_reporting() && !s.monthly_cost().is_zero())
        .map(|s| s.currency)
        .collect();

    let converter = CurrencyConverter::from(rates);
    let unconverted_currencies: Vec<Currency> = foreign
        .iter()
        .copied()
        .filter(|c| !converter.has_rate(*c))
        .collect();
    let is_approximate = !foreign.is_empty();

    SpendSummary {
        total_monthly_display: format_amount(
            total_monthly.round_dp(DISPLAY_DECIMAL_PRECISION),
            REPORTING_CURRENCY,
            is_approximate,
        ),
        monthly_only_display: format_amount(
            monthly_only.round_dp(DISPLAY_DECIMAL_PRECISION),
            REPORTING_CURRENCY,
            is_approximate,
        ),
        total_monthly,
        monthly_only,
        reporting_currency: REPORTING_CURRENCY,
        unconverted_currencies,
        is_approximate,
        rates_updated_at: rates.newest_updated_at(),
        subscription_count: subscriptions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use rust_decimal_macros::dec;

    fn subscription(cost: Decimal, currency: Currency, period: BillingPeriod) -> Subscription {
        let created = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Subscription {
            id: uuid::Uuid::new_v4().to_string(),
            name: format!("{} {}", currency, period),
            service_id: None,
            cost,
            currency,
            period,
            start_date: created.date(),
            active: true,
            created_at: created,
            updated_at: created,
        }
    }

    fn usd_rate(value: Decimal) -> ExchangeRate {
        ExchangeRate::new(
            Currency::Usd,
            value,
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_mixed_currency_totals() {
        let subs = vec![
            subscription(dec!(1000), Currency::Rub, BillingPeriod::Monthly),
            subscription(dec!(10), Currency::Usd, BillingPeriod::Yearly),
        ];
        let rates = vec![usd_rate(dec!(90))];

        assert_eq!(total_monthly_spend(&subs, &rates).round_dp(2), dec!(1075));
        assert_eq!(monthly_only_spend(&subs, &rates), dec!(1000));
    }

    #[test]
    fn test_total_is_idempotent() {
        let subs = vec![
            subscription(dec!(5.99), Currency::Usd, BillingPeriod::Weekly),
            subscription(dec!(2990), Currency::Rub, BillingPeriod::Quarterly),
        ];
        let rates = vec![usd_rate(dec!(91.3))];
        assert_eq!(
            total_monthly_spend(&subs, &rates),
            total_monthly_spend(&subs, &rates)
        );
    }

    #[test]
    fn test_zero_and_lifetime_contribute_nothing() {
        let subs = vec![
            subscription(dec!(0), Currency::Usd, BillingPeriod::Monthly),
            subscription(dec!(4990), Currency::Rub, BillingPeriod::Lifetime),
        ];
        assert_eq!(total_monthly_spend(&subs, &[]), Decimal::ZERO);
        assert_eq!(monthly_only_spend(&subs, &[]), Decimal::ZERO);
        assert_eq!(total_monthly_spend(&[], &[]), Decimal::ZERO);
    }

    #[test]
    fn test_missing_rate_passes_amount_through() {
        let subs = vec![
            subscription(dec!(100), Currency::Rub, BillingPeriod::Monthly),
            subscription(dec!(12), Currency::Eur, BillingPeriod::Monthly),
        ];
        let rates = vec![usd_rate(dec!(90))];
        assert_eq!(total_monthly_spend(&subs, &rates), dec!(112));
        assert_eq!(monthly_only_spend(&subs, &rates), dec!(112));
    }

    #[test]
    fn test_summary_reports_degraded_currencies() {
        let subs = vec![
            subscription(dec!(1000), Currency::Rub, BillingPeriod::Monthly),
            subscription(dec!(10), Currency::Usd, BillingPeriod::Yearly),
            subscription(dec!(3), Currency::Eur, BillingPeriod::Monthly),
        ];
        let cache = RateCache::new(vec![usd_rate(dec!(90))]);

        let summary = summarize_spend(&subs, &cache);
        assert_eq!(summary.monthly_only, dec!(1003));
        assert_eq!(summary.unconverted_currencies, vec![Currency::Eur]);
        assert!(summary.is_approximate);
        assert_eq!(summary.reporting_currency, Currency::Rub);
        assert_eq!(summary.total_monthly_display, "~1\u{a0}078\u{a0}₽");
        assert_eq!(summary.subscription_count, 3);
        assert_eq!(
            summary.rates_updated_at,
            Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_summary_of_reporting_currency_is_exact() {
        let subs = vec![subscription(dec!(299), Currency::Rub, BillingPeriod::Monthly)];
        let summary = summarize_spend(&subs, &RateCache::empty());
        assert!(!summary.is_approximate);
        assert!(summary.unconverted_currencies.is_empty());
        assert_eq!(summary.total_monthly_display, "299\u{a0}₽");
        assert_eq!(summary.rates_updated_at, None);
    }
}
