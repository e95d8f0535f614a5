//! Currency codes and price formatting.
//!
//! Prices are `rust_decimal::Decimal` everywhere; floating point never
//! touches money. The currency in effect comes from store settings.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency code configured in store settings.
///
/// Codes the storefront has a display symbol for are enumerated; anything
/// else round-trips as [`Currency::Other`] and displays its raw code in
/// place of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Ngn,
    Other(String),
}

impl Currency {
    /// ISO 4217 code for this currency.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
            Self::Ngn => "NGN",
            Self::Other(code) => code,
        }
    }

    /// Display symbol, falling back to the raw code when none is known.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Ngn => "₦",
            Self::Other(code) => code,
        }
    }

    /// Format an amount for display: symbol, thousands grouping, and exactly
    /// two decimal places (e.g. `₦19.90`, `$1,234.50`).
    #[must_use]
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{}{}", self.symbol(), grouped_two_decimals(amount))
    }
}

impl From<String> for Currency {
    fn from(code: String) -> Self {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Self::Usd,
            "EUR" => Self::Eur,
            "GBP" => Self::Gbp,
            "NGN" => Self::Ngn,
            _ => Self::Other(code),
        }
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_owned()
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Render an amount with comma thousands separators and a fixed two-digit
/// fraction.
fn grouped_two_decimals(amount: Decimal) -> String {
    let fixed = format!("{:.2}", amount.round_dp(2));
    let (sign, unsigned) = fixed
        .strip_prefix('-')
        .map_or(("", fixed.as_str()), |rest| ("-", rest));
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols() {
        assert_eq!(Currency::Usd.symbol(), "$");
        assert_eq!(Currency::Eur.symbol(), "€");
        assert_eq!(Currency::Gbp.symbol(), "£");
        assert_eq!(Currency::Ngn.symbol(), "₦");
        assert_eq!(Currency::Other("KES".to_owned()).symbol(), "KES");
    }

    #[test]
    fn test_format_pads_to_two_decimals() {
        let amount = Decimal::new(199, 1); // 19.9
        assert_eq!(Currency::Ngn.format_amount(amount), "₦19.90");
    }

    #[test]
    fn test_format_groups_thousands() {
        let amount = Decimal::new(12345, 1); // 1234.5
        assert_eq!(Currency::Usd.format_amount(amount), "$1,234.50");

        let amount = Decimal::new(1_234_567_89, 2); // 1,234,567.89
        assert_eq!(Currency::Usd.format_amount(amount), "$1,234,567.89");
    }

    #[test]
    fn test_format_negative() {
        let amount = Decimal::new(-10500, 2); // -105.00
        assert_eq!(Currency::Gbp.format_amount(amount), "£-105.00");
    }

    #[test]
    fn test_serde_roundtrip_known_and_unknown() {
        let json = serde_json::to_string(&Currency::Ngn).unwrap();
        assert_eq!(json, "\"NGN\"");
        let parsed: Currency = serde_json::from_str("\"ngn\"").unwrap();
        assert_eq!(parsed, Currency::Ngn);

        let parsed: Currency = serde_json::from_str("\"KES\"").unwrap();
        assert_eq!(parsed, Currency::Other("KES".to_owned()));
    }
}
