//! Table and balance listings.

use anyhow::Result;
use client_frontend_core::RefreshScope;
use game_core::SelectedContract;

use super::Controller;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    Units,
    Contracts,
    Levels,
    Balances,
}

impl ListKind {
    pub fn scope(self) -> RefreshScope {
        match self {
            ListKind::Units => RefreshScope::UNITS,
            // Unit names are joined in
            ListKind::Contracts => RefreshScope::CONTRACTS | RefreshScope::UNITS,
            ListKind::Levels => RefreshScope::LEVELS,
            ListKind::Balances => RefreshScope::BALANCES,
        }
    }
}

pub struct List {
    kind: ListKind,
}

impl List {
    pub fn new(kind: ListKind) -> Self {
        Self { kind }
    }

    pub fn execute(self, controller: &Controller) -> Result<()> {
        let catalog = controller.catalog();

        match self.kind {
            ListKind::Units => {
                for unit in &catalog.units {
                    println!(
                        "#{:<4} {:<20} atk {:<6} hp {:<6} {}",
                        unit.id, unit.name, unit.attack, unit.health, unit.linked_coin
                    );
                }
                println!("{} unit(s)", catalog.units.len());
            }
            ListKind::Contracts => {
                for contract in &catalog.contracts {
                    match SelectedContract::resolve(contract, &catalog.units) {
                        Some(selected) => println!(
                            "#{:<4} {:<20} {} {} each",
                            contract.id,
                            selected.unit_name,
                            contract.fixed_price,
                            selected.resource_name()
                        ),
                        None => println!(
                            "#{:<4} <unit {} missing> {} {} each",
                            contract.id,
                            contract.unit_id,
                            contract.fixed_price,
                            contract.resource_name()
                        ),
                    }
                }
                println!("{} contract(s)", catalog.contracts.len());
            }
            ListKind::Levels => {
                for level in &catalog.levels {
                    let rewards: Vec<_> = level
                        .rewards()
                        .iter()
                        .map(|r| format!("{} {}", r.amount, r.resource.struct_name()))
                        .collect();
                    println!(
                        "#{:<4} {:<20} atk {:<6} hp {:<6} rewards: {}",
                        level.id,
                        level.name,
                        level.attack,
                        level.health,
                        rewards.join(", ")
                    );
                }
                println!("{} level(s)", catalog.levels.len());
            }
            ListKind::Balances => {
                if controller.needs_starter_resources() {
                    println!("No balances. `pve mint` prints the starter-resources payload.");
                }
                for balance in &catalog.balances {
                    println!("{}", balance.display());
                }
            }
        }

        Ok(())
    }
}
