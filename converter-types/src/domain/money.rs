//! Decimal amounts and the conversion arithmetic.
//!
//! Amounts travel over the wire as JSON numbers, but all arithmetic happens
//! in `rust_decimal` so the two-place rounding is exact and reproducible.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

use crate::error::DomainError;

/// Decimal places of a converted amount.
pub const CONVERTED_SCALE: u32 = 2;

/// A strictly positive amount of some currency.
///
/// Keeps the value as received for the wire next to the decimal used for
/// arithmetic. The decimal drops digits beyond 28 places, so an amount far
/// below one cent may convert to zero while still echoing its input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount {
    value: Decimal,
    wire: f64,
}

impl Amount {
    /// Creates a new Amount, rejecting zero and negative values.
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidAmount);
        }
        Ok(Self {
            value,
            wire: decimal_to_f64(value),
        })
    }

    /// Parses plain (`"12.50"`) or scientific (`"1.25e1"`) notation.
    ///
    /// Anything that is not a finite positive number is `InvalidAmount`.
    /// A positive number beyond the decimal range is `AmountOverflow`.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let raw = raw.trim();
        if raw.is_empty() || raw.contains('_') {
            return Err(DomainError::InvalidAmount);
        }

        let wire = raw
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f > 0.0)
            .ok_or(DomainError::InvalidAmount)?;

        let exact = raw
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(&raw.to_ascii_lowercase()))
            .ok()
            .filter(|d| *d > Decimal::ZERO);

        let value = match exact {
            Some(value) => value,
            None => Decimal::from_f64(wire).ok_or(DomainError::AmountOverflow)?,
        };

        Ok(Self { value, wire })
    }

    /// Returns the decimal value used for arithmetic.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the amount as sent over the wire.
    pub fn to_f64(&self) -> f64 {
        self.wire
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Nearest `f64` to a decimal, for JSON output and storage.
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

/// Rounds half away from zero to [`CONVERTED_SCALE`] places.
pub fn round_converted(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CONVERTED_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Applies `rate` to `amount`: `round(amount * rate, 2)`.
pub fn convert(amount: Amount, rate: f64) -> Result<Decimal, DomainError> {
    let rate_dec = Decimal::from_f64(rate)
        .filter(|r| *r > Decimal::ZERO)
        .ok_or(DomainError::InvalidRate(rate))?;

    let product = amount
        .value()
        .checked_mul(rate_dec)
        .ok_or(DomainError::AmountOverflow)?;

    Ok(round_converted(product))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain_amount() {
        let amount = Amount::parse("100.50").unwrap();
        assert_eq!(amount.value(), dec("100.50"));
        assert_eq!(amount.to_f64(), 100.5);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Amount::parse("  42 ").unwrap().value(), dec("42"));
    }

    #[test]
    fn test_parse_scientific_amount() {
        assert_eq!(Amount::parse("1.5e3").unwrap().value(), dec("1500"));
        assert_eq!(Amount::parse("2E2").unwrap().value(), dec("200"));
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        for raw in ["abc", "", "12abc", "NaN", "inf", "1_000"] {
            assert!(
                matches!(Amount::parse(raw), Err(DomainError::InvalidAmount)),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_beyond_decimal_range_is_overflow() {
        for raw in ["1e30", "1E+40", "100000000000000000000000000000000"] {
            assert!(
                matches!(Amount::parse(raw), Err(DomainError::AmountOverflow)),
                "{raw:?} should overflow"
            );
        }
    }

    #[test]
    fn test_parse_tiny_amount_is_accepted() {
        let amount = Amount::parse("1e-30").unwrap();
        assert_eq!(amount.to_f64(), 1e-30);
        assert_eq!(convert(amount, 0.92).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_and_negative_rejected() {
        assert!(matches!(Amount::parse("0"), Err(DomainError::InvalidAmount)));
        assert!(matches!(Amount::parse("-5"), Err(DomainError::InvalidAmount)));
    }

    #[test]
    fn test_convert_rounds_to_two_places() {
        let amount = Amount::parse("100").unwrap();
        assert_eq!(convert(amount, 0.85123).unwrap(), dec("85.12"));
    }

    #[test]
    fn test_convert_rounds_midpoint_away_from_zero() {
        // 0.125 would become 0.12 under banker's rounding
        let amount = Amount::parse("0.125").unwrap();
        assert_eq!(convert(amount, 1.0).unwrap(), dec("0.13"));

        let amount = Amount::parse("1.005").unwrap();
        assert_eq!(convert(amount, 1.0).unwrap(), dec("1.01"));
    }

    #[test]
    fn test_convert_matches_f64_product_for_common_inputs() {
        let amount = Amount::parse("250").unwrap();
        let converted = convert(amount, 83.12).unwrap();
        assert_eq!(decimal_to_f64(converted), 20780.0);
    }

    #[test]
    fn test_convert_rejects_bad_rate() {
        let amount = Amount::parse("10").unwrap();
        assert!(matches!(convert(amount, 0.0), Err(DomainError::InvalidRate(_))));
        assert!(matches!(convert(amount, -1.2), Err(DomainError::InvalidRate(_))));
        assert!(matches!(
            convert(amount, f64::NAN),
            Err(DomainError::InvalidRate(_))
        ));
    }

    #[test]
    fn test_convert_overflow() {
        let amount = Amount::new(Decimal::MAX).unwrap();
        assert!(matches!(
            convert(amount, 1000.0),
            Err(DomainError::AmountOverflow)
        ));
    }
}
