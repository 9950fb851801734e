//! Which lists to re-fetch after a finalized submission.

use bitflags::bitflags;
use game_core::EntryFunction;

bitflags! {
    /// Lists affected by a submission.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct RefreshScope: u8 {
        const UNITS     = 1 << 0;
        const CONTRACTS = 1 << 1;
        const LEVELS    = 1 << 2;
        const BALANCES  = 1 << 3;
    }
}

impl RefreshScope {
    /// Lists whose on-chain contents `function` can change.
    pub fn after(function: EntryFunction) -> Self {
        match function {
            EntryFunction::MintCoins => Self::BALANCES,
            EntryFunction::CreateUnitType | EntryFunction::CreateUnit => Self::UNITS,
            EntryFunction::CreateUnitContract | EntryFunction::RemoveUnitContract => {
                Self::CONTRACTS
            }
            EntryFunction::CreateEnemyLevel
            | EntryFunction::CreateEnemyLevelWithTwoRewardCoins
            | EntryFunction::RemoveEnemyLevel => Self::LEVELS,
            EntryFunction::BuyUnits => Self::CONTRACTS | Self::BALANCES,
            EntryFunction::AttackEnemyWithOneUnitOneReward
            | EntryFunction::AttackEnemyWithOneUnitTwoReward
            | EntryFunction::AttackEnemyWithTwoUnitsOneReward
            | EntryFunction::AttackEnemyWithTwoUnitsTwoReward => {
                Self::CONTRACTS | Self::BALANCES | Self::LEVELS
            }
        }
    }
}
