//! Fixed-point decimals stored as scaled integers.
//!
//! The store never sees floating point: a `Decimal` is rounded to the column
//! scale and persisted as its mantissa (e.g. `12.34` with scale 2 ⇄ `1234`).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{EngineError, ResultEngine};

/// Precision/scale pair of a decimal column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedPoint {
    /// Total number of significant digits.
    pub precision: u32,
    /// Digits after the decimal point.
    pub scale: u32,
}

/// `amount`: 18 digits, 2 decimals.
pub const AMOUNT: FixedPoint = FixedPoint {
    precision: 18,
    scale: 2,
};

/// `your_percentage`: 5 digits, 2 decimals.
pub const PERCENTAGE: FixedPoint = FixedPoint {
    precision: 5,
    scale: 2,
};

impl FixedPoint {
    /// Converts `value` into scaled integer units.
    ///
    /// Extra decimals are rounded half away from zero. Values whose integer
    /// part does not fit `precision - scale` digits are rejected.
    pub fn to_minor(self, value: Decimal, field: &str) -> ResultEngine<i64> {
        let mut rounded =
            value.round_dp_with_strategy(self.scale, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(self.scale);

        let mantissa = rounded.mantissa();
        if mantissa.unsigned_abs() >= 10u128.pow(self.precision) {
            return Err(EngineError::InvalidField(format!(
                "{field} exceeds {} digits with {} decimals",
                self.precision, self.scale
            )));
        }

        i64::try_from(mantissa)
            .map_err(|_| EngineError::InvalidField(format!("{field} out of range")))
    }

    /// Converts scaled integer units back into a `Decimal`.
    #[must_use]
    pub fn from_minor(self, minor: i64) -> Decimal {
        Decimal::new(minor, self.scale)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    #[test]
    fn amount_is_stored_in_cents() {
        assert_eq!(AMOUNT.to_minor(dec("50.00"), "amount").unwrap(), 5000);
        assert_eq!(AMOUNT.to_minor(dec("75"), "amount").unwrap(), 7500);
        assert_eq!(AMOUNT.to_minor(dec("-0.5"), "amount").unwrap(), -50);
    }

    #[test]
    fn extra_decimals_round_half_away_from_zero() {
        assert_eq!(AMOUNT.to_minor(dec("1.005"), "amount").unwrap(), 101);
        assert_eq!(AMOUNT.to_minor(dec("-1.005"), "amount").unwrap(), -101);
        assert_eq!(AMOUNT.to_minor(dec("1.004"), "amount").unwrap(), 100);
    }

    #[test]
    fn precision_overflow_is_rejected() {
        assert!(AMOUNT.to_minor(dec("9999999999999999.99"), "amount").is_ok());
        assert!(matches!(
            AMOUNT.to_minor(dec("10000000000000000"), "amount"),
            Err(EngineError::InvalidField(_))
        ));
        assert!(PERCENTAGE.to_minor(dec("999.99"), "your_percentage").is_ok());
        assert!(matches!(
            PERCENTAGE.to_minor(dec("1000"), "your_percentage"),
            Err(EngineError::InvalidField(_))
        ));
    }

    #[test]
    fn from_minor_keeps_scale() {
        let value = AMOUNT.from_minor(7500);
        assert_eq!(value, dec("75.00"));
        assert_eq!(value.to_string(), "75.00");
        assert_eq!(PERCENTAGE.from_minor(3333).to_string(), "33.33");
    }
}
