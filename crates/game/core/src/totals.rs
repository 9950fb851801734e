//! Live attack and health totals for the committed units.

use crate::catalog::UnitDefinition;
use crate::selection::AttackSelection;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Totals {
    pub attack: u64,
    pub health: u64,
}

/// Sum `quantity × stat` over committed units.
///
/// Ids missing from `catalog` contribute nothing: the list may be mid-refresh
/// and the result is display-only.
pub fn totals(selection: &AttackSelection, catalog: &[UnitDefinition]) -> Totals {
    selection
        .committed()
        .filter_map(|(id, commitment)| {
            catalog
                .iter()
                .find(|u| u.id == id)
                .map(|unit| (unit, commitment.quantity))
        })
        .fold(Totals::default(), |acc, (unit, quantity)| Totals {
            attack: acc.attack.saturating_add(quantity.saturating_mul(unit.attack)),
            health: acc.health.saturating_add(quantity.saturating_mul(unit.health)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::UnitId;
    use crate::catalog::fixtures::{resource, unit};

    #[test]
    fn three_units_of_five_and_ten() {
        let catalog = vec![unit(7, 5, 10)];
        let mut selection = AttackSelection::new();
        selection.set(UnitId(7), 3, resource("0x1::a::A"));

        assert_eq!(totals(&selection, &catalog), Totals { attack: 15, health: 30 });
    }

    #[test]
    fn unknown_units_contribute_nothing() {
        let catalog = vec![unit(7, 5, 10)];
        let mut selection = AttackSelection::new();
        selection.set(UnitId(7), 1, resource("0x1::a::A"));
        selection.set(UnitId(42), 8, resource("0x1::z::Z"));

        assert_eq!(totals(&selection, &catalog), Totals { attack: 5, health: 10 });
        assert_eq!(totals(&selection, &[]), Totals::default());
    }

    #[test]
    fn saturates_instead_of_wrapping() {
        let catalog = vec![unit(1, u64::MAX, 1)];
        let mut selection = AttackSelection::new();
        selection.set(UnitId(1), 2, resource("0x1::a::A"));

        assert_eq!(totals(&selection, &catalog).attack, u64::MAX);
    }
}
