//! Records fetched from the game's view functions and the player's balances.
//!
//! These are snapshots: the client re-fetches whole lists after every
//! successful action and never patches them locally.

use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;
use crate::quantity::{self, format_human};
use crate::resource::ResourceType;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = CatalogError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse()
                    .map(Self)
                    .map_err(|_| CatalogError::InvalidId(s.to_string()))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }
    };
}

record_id!(
    /// Key of a unit definition in the on-chain unit table.
    UnitId
);
record_id!(
    /// Key of a purchase contract.
    ContractId
);
record_id!(
    /// Key of an enemy level.
    LevelId
);

// ============================================================================
// Records
// ============================================================================

/// A combat unit backed by its own fungible resource.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitDefinition {
    pub id: UnitId,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub attack: u64,
    pub health: u64,
    pub linked_coin: ResourceType,
}

/// Offer exchanging a payment resource for units of one type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PurchaseContract {
    pub id: ContractId,
    pub unit_id: UnitId,
    /// Resource backing the unit being sold.
    pub unit_type: ResourceType,
    /// Resource accepted as payment.
    pub payment: ResourceType,
    /// Integer multiplier per unit. Not scaled to base units.
    pub fixed_price: u64,
}

impl PurchaseContract {
    /// Display name of the payment resource.
    pub fn resource_name(&self) -> &str {
        self.payment.struct_name()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reward {
    pub resource: ResourceType,
    pub amount: u64,
}

/// An enemy paying out one or two reward resources when defeated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnemyLevel {
    pub id: LevelId,
    pub name: String,
    pub attack: u64,
    pub health: u64,
    rewards: Vec<Reward>,
}

impl EnemyLevel {
    /// Zip the two index-aligned reward vectors stored on chain.
    pub fn new(
        id: LevelId,
        name: impl Into<String>,
        attack: u64,
        health: u64,
        reward_types: Vec<ResourceType>,
        reward_amounts: Vec<u64>,
    ) -> Result<Self, CatalogError> {
        if reward_types.len() != reward_amounts.len() {
            return Err(CatalogError::RewardLengthMismatch {
                types: reward_types.len(),
                amounts: reward_amounts.len(),
            });
        }
        if !(1..=2).contains(&reward_types.len()) {
            return Err(CatalogError::UnsupportedRewardCount {
                count: reward_types.len(),
            });
        }

        let rewards = reward_types
            .into_iter()
            .zip(reward_amounts)
            .map(|(resource, amount)| Reward { resource, amount })
            .collect();

        Ok(Self {
            id,
            name: name.into(),
            attack,
            health,
            rewards,
        })
    }

    /// Rewards in on-chain order; always one or two entries.
    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn reward_types(&self) -> impl Iterator<Item = &ResourceType> {
        self.rewards.iter().map(|r| &r.resource)
    }
}

/// Non-zero balance of one fungible resource held by the player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceBalance {
    pub resource: ResourceType,
    pub name: String,
    pub symbol: String,
    /// Base units.
    pub amount: u64,
}

impl ResourceBalance {
    pub fn human_amount(&self) -> rust_decimal::Decimal {
        quantity::to_human(self.amount)
    }

    /// `"<amount> <name> (<symbol>)"` with two decimals.
    pub fn display(&self) -> String {
        format!("{} {} ({})", format_human(self.amount, 2), self.name, self.symbol)
    }
}

// ============================================================================
// Derived Views
// ============================================================================

/// Contract chosen in the purchase dialog, joined with its unit's name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedContract {
    pub contract_id: ContractId,
    pub unit_id: UnitId,
    pub unit_name: String,
    pub unit_type: ResourceType,
    pub payment: ResourceType,
    pub fixed_price: u64,
}

impl SelectedContract {
    /// `None` when the contract's unit is absent from the unit list.
    pub fn resolve(contract: &PurchaseContract, units: &[UnitDefinition]) -> Option<Self> {
        let unit = units.iter().find(|u| u.id == contract.unit_id)?;
        Some(Self {
            contract_id: contract.id,
            unit_id: unit.id,
            unit_name: unit.name.clone(),
            unit_type: contract.unit_type.clone(),
            payment: contract.payment.clone(),
            fixed_price: contract.fixed_price,
        })
    }

    pub fn resource_name(&self) -> &str {
        self.payment.struct_name()
    }
}

/// Level chosen as the attack target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedLevel {
    pub level_id: LevelId,
    pub name: String,
    pub reward_types: Vec<ResourceType>,
}

impl From<&EnemyLevel> for SelectedLevel {
    fn from(level: &EnemyLevel) -> Self {
        Self {
            level_id: level.id,
            name: level.name.clone(),
            reward_types: level.reward_types().cloned().collect(),
        }
    }
}

/// A unit the player can commit to an attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttackableUnit<'a> {
    pub unit: &'a UnitDefinition,
    /// Whole units held; upper bound of the commitment input.
    pub max_units: u64,
}

pub fn balance_for<'a>(
    balances: &'a [ResourceBalance],
    resource: &ResourceType,
) -> Option<&'a ResourceBalance> {
    balances.iter().find(|b| &b.resource == resource)
}

/// Units whose backing resource the player holds at least one whole unit of.
pub fn attackable_units<'a>(
    units: &'a [UnitDefinition],
    balances: &[ResourceBalance],
) -> Vec<AttackableUnit<'a>> {
    units
        .iter()
        .filter_map(|unit| {
            let balance = balance_for(balances, &unit.linked_coin)?;
            let max_units = balance.amount / quantity::SCALE;
            (max_units > 0).then_some(AttackableUnit { unit, max_units })
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn resource(s: &str) -> ResourceType {
        s.parse().unwrap()
    }

    pub fn unit(id: u64, attack: u64, health: u64) -> UnitDefinition {
        UnitDefinition {
            id: UnitId(id),
            name: format!("unit{id}"),
            description: "desc".into(),
            image_url: "https://img".into(),
            attack,
            health,
            linked_coin: resource(&format!("0xcafe::coin{id}::T")),
        }
    }

    pub fn level(id: u64, rewards: &[&str]) -> EnemyLevel {
        EnemyLevel::new(
            LevelId(id),
            "Goblin",
            10,
            20,
            rewards.iter().map(|r| resource(r)).collect(),
            rewards.iter().map(|_| 100).collect(),
        )
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn level_rejects_misaligned_rewards() {
        let err = EnemyLevel::new(
            LevelId(1),
            "Orc",
            1,
            1,
            vec![resource("0x1::a::A"), resource("0x1::b::B")],
            vec![5],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::RewardLengthMismatch { types: 2, amounts: 1 });
    }

    #[test]
    fn level_rejects_zero_or_three_rewards() {
        let none = EnemyLevel::new(LevelId(1), "Orc", 1, 1, vec![], vec![]);
        assert_eq!(none, Err(CatalogError::UnsupportedRewardCount { count: 0 }));

        let three = EnemyLevel::new(
            LevelId(1),
            "Orc",
            1,
            1,
            vec![
                resource("0x1::a::A"),
                resource("0x1::b::B"),
                resource("0x1::c::C"),
            ],
            vec![1, 2, 3],
        );
        assert_eq!(three, Err(CatalogError::UnsupportedRewardCount { count: 3 }));
    }

    #[test]
    fn contract_resolution_needs_the_unit() {
        let units = vec![unit(7, 5, 10)];
        let contract = PurchaseContract {
            id: ContractId(2),
            unit_id: UnitId(7),
            unit_type: units[0].linked_coin.clone(),
            payment: resource("0xcafe::gold::Gold"),
            fixed_price: 4,
        };

        let selected = SelectedContract::resolve(&contract, &units).unwrap();
        assert_eq!(selected.unit_name, "unit7");
        assert_eq!(selected.resource_name(), "Gold");

        let orphan = PurchaseContract {
            unit_id: UnitId(99),
            ..contract
        };
        assert!(SelectedContract::resolve(&orphan, &units).is_none());
    }

    #[test]
    fn attackable_units_require_a_whole_unit() {
        let units = vec![unit(1, 1, 1), unit(2, 1, 1), unit(3, 1, 1)];
        let balances = vec![
            ResourceBalance {
                resource: units[0].linked_coin.clone(),
                name: "coin1".into(),
                symbol: "C1".into(),
                amount: 250_000_000,
            },
            ResourceBalance {
                resource: units[1].linked_coin.clone(),
                name: "coin2".into(),
                symbol: "C2".into(),
                amount: 99_999_999,
            },
        ];

        let attackable = attackable_units(&units, &balances);
        assert_eq!(attackable.len(), 1);
        assert_eq!(attackable[0].unit.id, UnitId(1));
        assert_eq!(attackable[0].max_units, 2);
    }

    #[test]
    fn balance_display_uses_two_decimals() {
        let balance = ResourceBalance {
            resource: resource("0xcafe::gold::Gold"),
            name: "Gold".into(),
            symbol: "GLD".into(),
            amount: 1_234_567_890,
        };
        assert_eq!(balance.display(), "12.35 Gold (GLD)");
    }

    #[test]
    fn ids_parse_from_view_keys() {
        assert_eq!(" 12 ".parse::<UnitId>().unwrap(), UnitId(12));
        assert!("x".parse::<LevelId>().is_err());
    }
}
