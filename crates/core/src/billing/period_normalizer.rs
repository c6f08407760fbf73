use rust_decimal::Decimal;

use super::period::BillingPeriod;
use crate::constants::WEEKS_PER_MONTH;

/// Rescales `cost` billed every `period` to a per-month figure.
///
/// Lifetime purchases return zero so they never count toward recurring
/// totals. No rounding is applied.
pub fn monthly_equivalent_cost(cost: Decimal, period: BillingPeriod) -> Decimal {
    match period {
        BillingPeriod::Weekly => cost * WEEKS_PER_MONTH,
        BillingPeriod::Monthly => cost,
        BillingPeriod::Quarterly => cost / Decimal::from(3),
        BillingPeriod::SemiAnnual => cost / Decimal::from(6),
        BillingPeriod::Yearly => cost / Decimal::from(12),
        BillingPeriod::Lifetime => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_factors() {
        assert_eq!(monthly_equivalent_cost(dec!(1200), BillingPeriod::Yearly), dec!(100));
        assert_eq!(monthly_equivalent_cost(dec!(300), BillingPeriod::Quarterly), dec!(100));
        assert_eq!(monthly_equivalent_cost(dec!(600), BillingPeriod::SemiAnnual), dec!(100));
        assert_eq!(monthly_equivalent_cost(dec!(100), BillingPeriod::Weekly), dec!(433));
        assert_eq!(monthly_equivalent_cost(dec!(249.9), BillingPeriod::Monthly), dec!(249.9));
    }

    #[test]
    fn test_lifetime_is_always_zero() {
        for cost in [dec!(0), dec!(1), dec!(99999.99)] {
            assert_eq!(monthly_equivalent_cost(cost, BillingPeriod::Lifetime), Decimal::ZERO);
        }
    }

    #[test]
    fn test_no_rounding_applied() {
        let monthly = monthly_equivalent_cost(dec!(100), BillingPeriod::Quarterly);
        assert!(monthly > dec!(33.33) && monthly < dec!(33.34));
        assert_ne!(monthly, dec!(33.33));
    }
}
