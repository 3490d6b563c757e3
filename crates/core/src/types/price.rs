//! Monetary amounts using decimal arithmetic.
//!
//! Amounts are kept as [`Decimal`] so that cart math (`price * qty`, the 5%
//! shipping rate) is exact. Formatting rounds half away from zero to two
//! places, which matches how the storefront has always printed prices.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (reais, not centavos).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in the storefront's default currency.
    #[must_use]
    pub const fn brl(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::BRL)
    }

    /// The amount rounded to two decimal places.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}", self.currency_code.symbol(), self.rounded())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    BRL,
    USD,
    EUR,
}

impl CurrencyCode {
    /// Display symbol placed before the amount.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::BRL => "R$",
            Self::USD => "$",
            Self::EUR => "€",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_display_pads_two_places() {
        let price = Price::brl(Decimal::from(350));
        assert_eq!(price.to_string(), "R$ 350.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        let price = Price::brl(Decimal::from_str("12.345").unwrap());
        assert_eq!(price.to_string(), "R$ 12.35");
    }

    #[test]
    fn test_other_currency_symbol() {
        let price = Price::new(Decimal::from_str("9.9").unwrap(), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$ 9.90");
    }
}
