//! Purchase bounds derived from the player's balance.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::ComposeError;
use crate::quantity::to_human;

/// Largest whole number of units purchasable with `balance` base units at
/// `unit_price` human units each.
///
/// Returns 0 for a non-positive price or an empty balance. The result `m`
/// satisfies `m × price ≤ balance / 10^8 < (m + 1) × price` exactly; the
/// decimal quotient is corrected when division rounds across an integer
/// boundary.
pub fn max_affordable(balance: u64, unit_price: Decimal) -> u64 {
    if unit_price <= Decimal::ZERO || balance == 0 {
        return 0;
    }

    let human = to_human(balance);
    let mut count = match human.checked_div(unit_price) {
        Some(quotient) => quotient.floor().to_u64().unwrap_or(u64::MAX),
        None => return u64::MAX,
    };

    let cost = |n: u64| Decimal::from(n).checked_mul(unit_price);

    while count > 0 && cost(count).is_none_or(|c| c > human) {
        count -= 1;
    }
    while count < u64::MAX && cost(count + 1).is_some_and(|c| c <= human) {
        count += 1;
    }

    count
}

/// Clamp a requested quantity into `[1, max]`; 0 when nothing is affordable.
pub fn clamp_quantity(requested: u64, max: u64) -> u64 {
    if max == 0 { 0 } else { requested.clamp(1, max) }
}

/// Reject quantities outside `[1, max]`.
pub fn validate_quantity(requested: u64, max: u64) -> Result<u64, ComposeError> {
    if requested == 0 || requested > max {
        return Err(ComposeError::QuantityOutOfRange { requested, max });
    }
    Ok(requested)
}

/// Price shown beside the quantity input: `quantity × fixed_price`, in the
/// contract's unscaled price unit.
pub fn total_cost(quantity: u64, fixed_price: u64) -> u128 {
    u128::from(quantity) * u128::from(fixed_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn five_hundred_at_twelve_and_a_half_buys_forty() {
        assert_eq!(max_affordable(50_000_000_000, dec("12.5")), 40);
    }

    #[test]
    fn zero_balance_or_price_buys_nothing() {
        assert_eq!(max_affordable(0, dec("1")), 0);
        assert_eq!(max_affordable(100_000_000, Decimal::ZERO), 0);
        assert_eq!(max_affordable(100_000_000, dec("-3")), 0);
    }

    #[test]
    fn exact_multiple_is_included() {
        // 3 human units at price 1 → 3, not 2
        assert_eq!(max_affordable(300_000_000, Decimal::ONE), 3);
        // one base unit short of 3
        assert_eq!(max_affordable(299_999_999, Decimal::ONE), 2);
    }

    #[test]
    fn repeating_quotient_floors() {
        assert_eq!(max_affordable(100_000_000, dec("0.3")), 3);
        assert_eq!(max_affordable(1_000_000_000, dec("3")), 3);
    }

    #[test]
    fn clamp_and_validate() {
        assert_eq!(clamp_quantity(0, 5), 1);
        assert_eq!(clamp_quantity(9, 5), 5);
        assert_eq!(clamp_quantity(3, 0), 0);

        assert_eq!(validate_quantity(3, 5), Ok(3));
        assert!(validate_quantity(0, 5).is_err());
        assert_eq!(
            validate_quantity(6, 5),
            Err(ComposeError::QuantityOutOfRange { requested: 6, max: 5 })
        );
    }

    #[test]
    fn total_cost_is_unscaled() {
        assert_eq!(total_cost(6, 4), 24);
    }

    proptest! {
        #[test]
        fn result_sits_on_the_floor_boundary(
            balance in 1u64..=10_000_000_000_000,
            cents in 1u64..=1_000_000,
        ) {
            let price = Decimal::new(cents as i64, 2);
            let human = to_human(balance);
            let m = max_affordable(balance, price);

            prop_assert!(Decimal::from(m) * price <= human);
            prop_assert!(Decimal::from(m + 1) * price > human);
        }

        #[test]
        fn validated_quantities_stay_in_range(req in any::<u64>(), max in 0u64..1_000) {
            if let Ok(q) = validate_quantity(req, max) {
                prop_assert!(q >= 1 && q <= max);
            }
        }
    }
}
