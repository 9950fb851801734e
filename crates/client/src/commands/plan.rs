//! Payload composition for attacks, purchases and minting.
//!
//! Nothing is signed here; the printed JSON is what a wallet would be asked
//! to approve.

use std::str::FromStr;

use anyhow::{Result, bail};
use clap::Args;
use client_frontend_core::RefreshScope;
use game_core::{ContractId, LevelId, UnitId};

use super::{Controller, print_payload};

/// `UNIT_ID=QUANTITY`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnitCommitment {
    pub unit: UnitId,
    pub quantity: u64,
}

impl FromStr for UnitCommitment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (unit, quantity) = s
            .split_once('=')
            .ok_or_else(|| format!("expected UNIT_ID=QUANTITY, got `{s}`"))?;
        let unit = unit.trim().parse().map_err(|e| format!("{e}"))?;
        let quantity = quantity
            .trim()
            .parse()
            .map_err(|_| format!("invalid quantity `{quantity}`"))?;
        Ok(Self { unit, quantity })
    }
}

/// Print the attack payload
#[derive(Args)]
pub struct Attack {
    /// Enemy level to attack
    #[arg(long, value_name = "ID")]
    level: LevelId,

    /// Units to commit (repeatable, at most two types)
    #[arg(long = "unit", value_name = "ID=QTY", required = true)]
    units: Vec<UnitCommitment>,
}

impl Attack {
    pub const SCOPE: RefreshScope = RefreshScope::UNITS
        .union(RefreshScope::LEVELS)
        .union(RefreshScope::BALANCES);

    pub fn execute(self, controller: &Controller) -> Result<()> {
        let level = controller.select_level(self.level)?;

        for commitment in &self.units {
            let stored = controller.commit_units(commitment.unit, commitment.quantity)?;
            if stored < commitment.quantity {
                bail!(
                    "unit {}: {} requested but only {} held",
                    commitment.unit,
                    commitment.quantity,
                    stored
                );
            }
        }

        let totals = controller.totals();
        tracing::info!(
            level = %level.name,
            units = controller.total_units(),
            attack = totals.attack,
            health = totals.health,
            "Attack plan"
        );

        print_payload(&controller.prepare_attack()?)
    }
}

/// Print the purchase payload
#[derive(Args)]
pub struct Buy {
    /// Purchase contract
    #[arg(long, value_name = "ID")]
    contract: ContractId,

    /// Whole units to buy
    #[arg(long, short, default_value_t = 1)]
    quantity: u64,
}

impl Buy {
    pub const SCOPE: RefreshScope = RefreshScope::UNITS
        .union(RefreshScope::CONTRACTS)
        .union(RefreshScope::BALANCES);

    pub fn execute(self, controller: &Controller) -> Result<()> {
        let contract = controller.select_contract(self.contract)?;

        let max = controller.max_affordable();
        if self.quantity == 0 || self.quantity > max {
            bail!(
                "can afford between 1 and {max} {} with the current {} balance, {} requested",
                contract.unit_name,
                contract.resource_name(),
                self.quantity
            );
        }
        controller.set_purchase_quantity(self.quantity);

        if let Some(cost) = controller.total_cost() {
            tracing::info!(
                unit = %contract.unit_name,
                quantity = self.quantity,
                cost = %cost,
                resource = contract.resource_name(),
                "Purchase plan"
            );
        }

        print_payload(&controller.prepare_purchase()?)
    }
}

/// Print the starter-resources payload
#[derive(Args)]
pub struct Mint {}

impl Mint {
    pub const SCOPE: RefreshScope = RefreshScope::BALANCES;

    pub fn execute(self, controller: &Controller) -> Result<()> {
        if !controller.needs_starter_resources() {
            tracing::warn!("Player already holds balances; minting is meant for new accounts");
        }
        print_payload(&controller.composer().mint_coins())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unit_commitments() {
        assert_eq!(
            "3=12".parse::<UnitCommitment>().unwrap(),
            UnitCommitment {
                unit: UnitId(3),
                quantity: 12
            }
        );
        assert!("3".parse::<UnitCommitment>().is_err());
        assert!("x=1".parse::<UnitCommitment>().is_err());
        assert!("1=-2".parse::<UnitCommitment>().is_err());
    }
}
