use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::ValidationError;

/// Currencies a subscription can be billed in.
///
/// The set is closed: codes coming from storage or HTTP payloads are parsed
/// into this enum on ingress, so arithmetic never branches on raw strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "RUB")]
    Rub,
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Rub => "RUB",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Rub => "₽",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }

    /// RUB is the reporting currency and never has a stored rate.
    pub fn is_reporting(&self) -> bool {
        matches!(self, Currency::Rub)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RUB" => Ok(Currency::Rub),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            other => Err(ValidationError::InvalidInput(format!(
                "Unsupported currency '{}'",
                other
            ))),
        }
    }
}

/// Group and symbol separator used by the ru-RU number format
const NBSP: char = '\u{a0}';

/// Formats an amount for display: thousands grouped with non-breaking spaces,
/// comma decimal separator, at most two fraction digits and a trailing
/// currency symbol.
///
/// Converted amounts are prefixed with `~` since they are approximate.
pub fn format_amount(amount: Decimal, currency: Currency, is_converted: bool) -> String {
    let rounded = amount
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text.clone(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if is_converted {
        out.push('~');
    }
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(&frac);
    }
    out.push(NBSP);
    out.push_str(currency.symbol());
    out
}
