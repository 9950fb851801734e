//! pve_battles Move module integration.
//!
//! ## Move Module Reference
//!
//! ```move
//! module pve::pve_battles {
//!     struct Unit has store, copy, drop {
//!         name: String, description: String, image_url: String,
//!         attack: u64, health: u64, linked_coin_type: String,
//!     }
//!     struct UnitContract has store, copy, drop {
//!         unit_id: u64, unit_type: String, coin_address: address,
//!         resource_type_info: TypeInfo, fixed_price: u64,
//!     }
//!     struct EnemyLevel has store, copy, drop {
//!         name: String, attack: u64, health: u64,
//!         reward_coin_types: vector<String>, reward_coin_amounts: vector<u64>,
//!     }
//!
//!     #[view] public fun get_all_units(addr: address): SimpleMap<u64, Unit>;
//!     #[view] public fun get_all_unit_contracts(addr: address): SimpleMap<u64, UnitContract>;
//!     #[view] public fun get_all_enemy_levels(addr: address): SimpleMap<u64, EnemyLevel>;
//! }
//! ```
//!
//! A `SimpleMap` comes back from `/view` as `[{"data": [{"key", "value"}, ...]}]`.

use client_blockchain_core::QueryError;
use game_core::{
    AccountAddress, ContractId, EnemyLevel, LevelId, ModuleId, PurchaseContract, ResourceType,
    UnitDefinition, UnitId,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use strum::{AsRefStr, EnumIter};

use crate::core::types::ViewRequest;
use crate::utils::conversion::{de_u64, de_u64_vec, hex_to_text};

/// Read-only functions of the game module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ViewFunction {
    GetAllUnits,
    GetAllUnitContracts,
    GetAllEnemyLevels,
}

// ============================================================================
// Move records (1:1 mapping with Move structs)
// ============================================================================

#[derive(Debug, Deserialize)]
struct SimpleMap<V> {
    data: Vec<SimpleMapEntry<V>>,
}

#[derive(Debug, Deserialize)]
struct SimpleMapEntry<V> {
    #[serde(deserialize_with = "de_u64")]
    key: u64,
    value: V,
}

#[derive(Debug, Deserialize)]
struct UnitRecord {
    name: String,
    description: String,
    image_url: String,
    #[serde(deserialize_with = "de_u64")]
    attack: u64,
    #[serde(deserialize_with = "de_u64")]
    health: u64,
    linked_coin_type: String,
}

#[derive(Debug, Deserialize)]
struct TypeInfoRecord {
    /// Hex-encoded UTF-8
    module_name: String,
    /// Hex-encoded UTF-8
    struct_name: String,
}

#[derive(Debug, Deserialize)]
struct ContractRecord {
    #[serde(deserialize_with = "de_u64")]
    unit_id: u64,
    unit_type: String,
    coin_address: String,
    resource_type_info: TypeInfoRecord,
    #[serde(deserialize_with = "de_u64")]
    fixed_price: u64,
}

#[derive(Debug, Deserialize)]
struct LevelRecord {
    name: String,
    #[serde(deserialize_with = "de_u64")]
    attack: u64,
    #[serde(deserialize_with = "de_u64")]
    health: u64,
    reward_coin_types: Vec<String>,
    #[serde(deserialize_with = "de_u64_vec")]
    reward_coin_amounts: Vec<u64>,
}

fn parse_resource(raw: &str) -> Result<ResourceType, QueryError> {
    raw.parse()
        .map_err(|e: game_core::ResourceTypeError| QueryError::Catalog(e.into()))
}

// ============================================================================
// PveBattlesContract
// ============================================================================

/// View-call builders and decoders for the game module.
#[derive(Debug, Clone)]
pub struct PveBattlesContract {
    module: ModuleId,
}

impl PveBattlesContract {
    pub fn new(module: ModuleId) -> Self {
        Self { module }
    }

    pub fn module(&self) -> &ModuleId {
        &self.module
    }

    pub fn view_request(&self, function: ViewFunction, owner: &AccountAddress) -> ViewRequest {
        ViewRequest {
            function: self.module.function_id(function.as_ref()),
            type_arguments: vec![],
            arguments: vec![owner.to_string()],
        }
    }

    /// Unwrap the single `SimpleMap` return value, ordered by key.
    fn decode_map<V: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<(u64, V)>, QueryError> {
        let first = values
            .into_iter()
            .next()
            .ok_or_else(|| QueryError::InvalidData("view returned no values".to_string()))?;
        let map: SimpleMap<V> = serde_json::from_value(first)
            .map_err(|e| QueryError::InvalidData(e.to_string()))?;

        let mut entries: Vec<_> = map.data.into_iter().map(|e| (e.key, e.value)).collect();
        entries.sort_by_key(|(key, _)| *key);
        Ok(entries)
    }

    pub fn decode_units(values: Vec<Value>) -> Result<Vec<UnitDefinition>, QueryError> {
        Self::decode_map::<UnitRecord>(values)?
            .into_iter()
            .map(|(key, unit)| -> Result<UnitDefinition, QueryError> {
                Ok(UnitDefinition {
                    id: UnitId(key),
                    name: unit.name,
                    description: unit.description,
                    image_url: unit.image_url,
                    attack: unit.attack,
                    health: unit.health,
                    linked_coin: parse_resource(&unit.linked_coin_type)?,
                })
            })
            .collect()
    }

    /// The payment resource is rebuilt from `coin_address` and the
    /// hex-encoded module and struct names in `resource_type_info`.
    pub fn decode_contracts(values: Vec<Value>) -> Result<Vec<PurchaseContract>, QueryError> {
        Self::decode_map::<ContractRecord>(values)?
            .into_iter()
            .map(|(key, contract)| -> Result<PurchaseContract, QueryError> {
                let info = &contract.resource_type_info;
                let payment = format!(
                    "{}::{}::{}",
                    contract.coin_address,
                    hex_to_text(&info.module_name)?,
                    hex_to_text(&info.struct_name)?
                );

                Ok(PurchaseContract {
                    id: ContractId(key),
                    unit_id: UnitId(contract.unit_id),
                    unit_type: parse_resource(&contract.unit_type)?,
                    payment: parse_resource(&payment)?,
                    fixed_price: contract.fixed_price,
                })
            })
            .collect()
    }

    pub fn decode_levels(values: Vec<Value>) -> Result<Vec<EnemyLevel>, QueryError> {
        Self::decode_map::<LevelRecord>(values)?
            .into_iter()
            .map(|(key, level)| -> Result<EnemyLevel, QueryError> {
                let reward_types = level
                    .reward_coin_types
                    .iter()
                    .map(|raw| parse_resource(raw.as_str()))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(EnemyLevel::new(
                    LevelId(key),
                    level.name,
                    level.attack,
                    level.health,
                    reward_types,
                    level.reward_coin_amounts,
                )?)
            })
            .collect()
    }
}
