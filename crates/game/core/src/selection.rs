//! Session selection state: the purchase dialog, the attack target and the
//! units committed against it.

use std::collections::BTreeMap;

use crate::affordability::clamp_quantity;
use crate::catalog::{SelectedContract, SelectedLevel, UnitId};
use crate::resource::ResourceType;

/// Quantity of one unit type committed to an attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commitment {
    /// Whole units.
    pub quantity: u64,
    pub resource: ResourceType,
}

/// Unit commitments keyed by unit id, iterated in ascending id order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackSelection {
    entries: BTreeMap<UnitId, Commitment>,
}

impl AttackSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity for a unit. A zero quantity keeps the entry but it
    /// no longer counts as committed.
    pub fn set(&mut self, unit: UnitId, quantity: u64, resource: ResourceType) {
        self.entries.insert(unit, Commitment { quantity, resource });
    }

    pub fn get(&self, unit: UnitId) -> Option<&Commitment> {
        self.entries.get(&unit)
    }

    pub fn remove(&mut self, unit: UnitId) -> Option<Commitment> {
        self.entries.remove(&unit)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.committed().next().is_none()
    }

    /// Entries with a non-zero quantity.
    pub fn committed(&self) -> impl Iterator<Item = (UnitId, &Commitment)> {
        self.entries
            .iter()
            .filter(|(_, c)| c.quantity > 0)
            .map(|(id, c)| (*id, c))
    }

    pub fn distinct_committed(&self) -> usize {
        self.committed().count()
    }

    pub fn total_units(&self) -> u64 {
        self.committed()
            .fold(0u64, |acc, (_, c)| acc.saturating_add(c.quantity))
    }
}

/// Everything the player has chosen in the current session.
#[derive(Clone, Debug, Default)]
pub struct SelectionState {
    contract: Option<SelectedContract>,
    purchase_quantity: u64,
    level: Option<SelectedLevel>,
    attack: AttackSelection,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------------
    // Purchase flow
    // ------------------------------------------------------------------------

    /// Open the purchase dialog; the quantity starts at one unit.
    pub fn select_contract(&mut self, contract: SelectedContract) {
        self.contract = Some(contract);
        self.purchase_quantity = 1;
    }

    pub fn dismiss_contract(&mut self) {
        self.contract = None;
        self.purchase_quantity = 0;
    }

    pub fn contract(&self) -> Option<&SelectedContract> {
        self.contract.as_ref()
    }

    /// Store `requested` clamped into `[1, max]`; returns the stored value.
    pub fn set_purchase_quantity(&mut self, requested: u64, max: u64) -> u64 {
        self.purchase_quantity = clamp_quantity(requested, max);
        self.purchase_quantity
    }

    pub fn purchase_quantity(&self) -> u64 {
        self.purchase_quantity
    }

    // ------------------------------------------------------------------------
    // Attack flow
    // ------------------------------------------------------------------------

    /// Choose a new target. Commitments made against a previous target are
    /// dropped.
    pub fn select_level(&mut self, level: SelectedLevel) {
        self.level = Some(level);
        self.attack.clear();
    }

    pub fn dismiss_level(&mut self) {
        self.level = None;
        self.attack.clear();
    }

    pub fn level(&self) -> Option<&SelectedLevel> {
        self.level.as_ref()
    }

    pub fn attack(&self) -> &AttackSelection {
        &self.attack
    }

    pub fn attack_mut(&mut self) -> &mut AttackSelection {
        &mut self.attack
    }
}
