//! Fixed-point conversion between human quantities and ledger base units.
//!
//! The ledger stores every fungible amount as an integer count of base units,
//! `human × 10^8`. All arithmetic goes through [`Decimal`] so that chains of
//! multiplications and divisions never pick up binary floating-point drift.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Number of fractional digits carried by every resource on the ledger.
pub const DECIMALS: u32 = 8;

/// `10^DECIMALS`.
pub const SCALE: u64 = 100_000_000;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("quantity must not be negative, got {0}")]
    Negative(Decimal),

    #[error("quantity {0} does not fit in u64 base units")]
    Overflow(Decimal),
}

/// Convert a human quantity to base units, truncating anything finer than
/// one base unit.
pub fn to_base_units(quantity: Decimal) -> Result<u64, QuantityError> {
    if quantity < Decimal::ZERO {
        return Err(QuantityError::Negative(quantity));
    }

    quantity
        .checked_mul(Decimal::from(SCALE))
        .and_then(|scaled| scaled.trunc().to_u64())
        .ok_or(QuantityError::Overflow(quantity))
}

/// Convert base units to the exact human quantity.
pub fn to_human(base_units: u64) -> Decimal {
    Decimal::from_i128_with_scale(i128::from(base_units), DECIMALS)
}

/// Whole-unit shortcut for [`to_base_units`]: `units × 10^8`.
pub fn units_to_base(units: u64) -> Result<u64, QuantityError> {
    units
        .checked_mul(SCALE)
        .ok_or_else(|| QuantityError::Overflow(Decimal::from(units)))
}

/// Render base units as a human amount with a fixed number of decimals.
pub fn format_human(base_units: u64, places: u32) -> String {
    let value = to_human(base_units).round_dp(places);
    format!("{value:.prec$}", prec = places as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    #[test]
    fn scales_by_eight_digits() {
        assert_eq!(to_base_units(Decimal::from(3)), Ok(300_000_000));
        assert_eq!(to_base_units(Decimal::from_str("12.5").unwrap()), Ok(1_250_000_000));
        assert_eq!(to_base_units(Decimal::from_str("0.00000001").unwrap()), Ok(1));
        assert_eq!(to_human(50_000_000_000), Decimal::from(500));
    }

    #[test]
    fn sub_base_unit_fractions_truncate() {
        assert_eq!(to_base_units(Decimal::from_str("0.000000019").unwrap()), Ok(1));
        assert_eq!(to_base_units(Decimal::from_str("0.000000009").unwrap()), Ok(0));
    }

    #[test]
    fn negative_input_is_rejected() {
        let err = to_base_units(Decimal::from(-1)).unwrap_err();
        assert!(matches!(err, QuantityError::Negative(_)));
    }

    #[test]
    fn overflow_is_reported() {
        assert!(matches!(
            to_base_units(Decimal::from(u64::MAX)),
            Err(QuantityError::Overflow(_))
        ));
        assert!(matches!(units_to_base(u64::MAX), Err(QuantityError::Overflow(_))));
    }

    #[test]
    fn decimal_avoids_float_drift() {
        // 0.1 + 0.2 in f64 is 0.30000000000000004
        let sum = Decimal::from_str("0.1").unwrap() + Decimal::from_str("0.2").unwrap();
        assert_eq!(to_base_units(sum), Ok(30_000_000));
    }

    #[test]
    fn formats_two_places() {
        assert_eq!(format_human(50_000_000_000, 2), "500.00");
        assert_eq!(format_human(123_456_789, 2), "1.23");
        assert_eq!(format_human(0, 2), "0.00");
    }

    proptest! {
        #[test]
        fn base_units_round_trip_exactly(b in any::<u64>()) {
            prop_assert_eq!(to_base_units(to_human(b)), Ok(b));
        }

        #[test]
        fn whole_units_agree_with_decimal_path(n in 0u64..=100_000_000_000) {
            prop_assert_eq!(units_to_base(n), to_base_units(Decimal::from(n)));
        }
    }
}
