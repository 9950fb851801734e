//! Entry-point selection.
//!
//! Each choice is a table over a small discrete domain. Counts are first
//! narrowed to an arity enum (rejecting out-of-range counts) and the arity
//! pair is then matched exhaustively.

use crate::error::ComposeError;
use crate::payload::EntryFunction;

/// Number of distinct unit types committed to an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitArity {
    One,
    Two,
}

impl UnitArity {
    pub fn from_count(count: usize) -> Result<Self, ComposeError> {
        match count {
            0 => Err(ComposeError::NoUnitsCommitted),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            count => Err(ComposeError::TooManyUnitTypes { count }),
        }
    }
}

/// Number of reward resource types a level pays out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RewardArity {
    One,
    Two,
}

impl RewardArity {
    pub fn from_count(count: usize) -> Result<Self, ComposeError> {
        match count {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            count => Err(ComposeError::UnsupportedRewardCount { count }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttackVariant {
    OneUnitOneReward,
    OneUnitTwoRewards,
    TwoUnitsOneReward,
    TwoUnitsTwoRewards,
}

impl AttackVariant {
    pub const ALL: [Self; 4] = [
        Self::OneUnitOneReward,
        Self::OneUnitTwoRewards,
        Self::TwoUnitsOneReward,
        Self::TwoUnitsTwoRewards,
    ];

    pub const fn entry_function(self) -> EntryFunction {
        match self {
            Self::OneUnitOneReward => EntryFunction::AttackEnemyWithOneUnitOneReward,
            Self::OneUnitTwoRewards => EntryFunction::AttackEnemyWithOneUnitTwoReward,
            Self::TwoUnitsOneReward => EntryFunction::AttackEnemyWithTwoUnitsOneReward,
            Self::TwoUnitsTwoRewards => EntryFunction::AttackEnemyWithTwoUnitsTwoReward,
        }
    }
}

pub const fn select_attack(units: UnitArity, rewards: RewardArity) -> AttackVariant {
    match (units, rewards) {
        (UnitArity::One, RewardArity::One) => AttackVariant::OneUnitOneReward,
        (UnitArity::One, RewardArity::Two) => AttackVariant::OneUnitTwoRewards,
        (UnitArity::Two, RewardArity::One) => AttackVariant::TwoUnitsOneReward,
        (UnitArity::Two, RewardArity::Two) => AttackVariant::TwoUnitsTwoRewards,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelVariant {
    OneReward,
    TwoRewards,
}

impl LevelVariant {
    pub const fn entry_function(self) -> EntryFunction {
        match self {
            Self::OneReward => EntryFunction::CreateEnemyLevel,
            Self::TwoRewards => EntryFunction::CreateEnemyLevelWithTwoRewardCoins,
        }
    }
}

/// Level creation by number of reward resource types chosen in the form.
pub fn select_level_creation(reward_count: usize) -> Result<LevelVariant, ComposeError> {
    match reward_count {
        0 => Err(ComposeError::MissingField("reward resource")),
        1 => Ok(LevelVariant::OneReward),
        2 => Ok(LevelVariant::TwoRewards),
        count => Err(ComposeError::UnsupportedRewardCount { count }),
    }
}
