//! Entry-function call descriptors.
//!
//! A payload is the module, the entry-point name, and two positional lists:
//! generic type arguments and value arguments. Both lists bind by position on
//! chain, so their order is part of the wire format.

use std::fmt;

use strum::{AsRefStr, Display, EnumIter, IntoStaticStr};

use crate::resource::{ModuleId, ResourceType};

/// State-mutating entry points exposed by the game module.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Display, AsRefStr, IntoStaticStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum EntryFunction {
    MintCoins,
    CreateUnitType,
    CreateUnit,
    CreateUnitContract,
    CreateEnemyLevel,
    CreateEnemyLevelWithTwoRewardCoins,
    RemoveUnitContract,
    RemoveEnemyLevel,
    BuyUnits,
    AttackEnemyWithOneUnitOneReward,
    AttackEnemyWithOneUnitTwoReward,
    AttackEnemyWithTwoUnitsOneReward,
    AttackEnemyWithTwoUnitsTwoReward,
}

impl EntryFunction {
    pub const fn is_attack(self) -> bool {
        matches!(
            self,
            Self::AttackEnemyWithOneUnitOneReward
                | Self::AttackEnemyWithOneUnitTwoReward
                | Self::AttackEnemyWithTwoUnitsOneReward
                | Self::AttackEnemyWithTwoUnitsTwoReward
        )
    }
}

/// A positional value argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveValue {
    U64(u64),
    String(String),
}

impl MoveValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            Self::String(_) => None,
        }
    }
}

impl From<u64> for MoveValue {
    fn from(value: u64) -> Self {
        Self::U64(value)
    }
}

impl From<String> for MoveValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for MoveValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl fmt::Display for MoveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U64(v) => write!(f, "{v}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

/// Fully composed call, ready for the signer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryFunctionPayload {
    pub module: ModuleId,
    pub function: EntryFunction,
    pub type_arguments: Vec<ResourceType>,
    pub arguments: Vec<MoveValue>,
}

impl EntryFunctionPayload {
    /// `<address>::<module>::<function>`
    pub fn function_id(&self) -> String {
        self.module.function_id(self.function.as_ref())
    }

    /// Value arguments that are integers, in order.
    pub fn u64_arguments(&self) -> Vec<u64> {
        self.arguments.iter().filter_map(MoveValue::as_u64).collect()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{EntryFunctionPayload, MoveValue};
    use serde::ser::{Serialize, SerializeMap, Serializer};

    /// `u64` travels as a decimal string in the node's JSON encoding.
    impl Serialize for MoveValue {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                MoveValue::U64(v) => serializer.collect_str(v),
                MoveValue::String(s) => serializer.serialize_str(s),
            }
        }
    }

    impl Serialize for EntryFunctionPayload {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(4))?;
            map.serialize_entry("type", "entry_function_payload")?;
            map.serialize_entry("function", &self.function_id())?;
            map.serialize_entry("type_arguments", &self.type_arguments)?;
            map.serialize_entry("arguments", &self.arguments)?;
            map.end()
        }
    }
}
