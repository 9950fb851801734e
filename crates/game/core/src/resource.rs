//! Ledger identifiers: account addresses, fungible resource types and the
//! module hosting the game's entry points.

use std::fmt;
use std::str::FromStr;

/// Length of an account address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceTypeError {
    #[error("invalid account address {0:?}")]
    InvalidAddress(String),

    #[error("resource type {0:?} is not of the form <address>::<module>::<struct>")]
    Malformed(String),

    #[error("invalid Move identifier {0:?}")]
    InvalidIdentifier(String),
}

// ============================================================================
// Account Address
// ============================================================================

/// 32-byte account address.
///
/// Always rendered in the long form (`0x` + 64 lowercase hex digits) so that
/// `0x1`, `0x01` and the padded form compare equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; ADDRESS_LENGTH]);

impl AccountAddress {
    pub const ZERO: Self = Self([0; ADDRESS_LENGTH]);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Long-form hex without the `0x` prefix.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for AccountAddress {
    type Err = ResourceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ResourceTypeError::InvalidAddress(s.to_string());

        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.is_empty() || digits.len() > ADDRESS_LENGTH * 2 {
            return Err(invalid());
        }

        let padded = format!("{digits:0>64}");
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes).map_err(|_| invalid())?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({self})")
    }
}

fn validate_identifier(ident: &str) -> Result<(), ResourceTypeError> {
    let mut chars = ident.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if valid {
        Ok(())
    } else {
        Err(ResourceTypeError::InvalidIdentifier(ident.to_string()))
    }
}

// ============================================================================
// Resource Type
// ============================================================================

/// Fully qualified on-chain type of a fungible resource,
/// `<address>::<module>::<struct>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceType {
    pub address: AccountAddress,
    pub module: String,
    pub name: String,
}

impl ResourceType {
    pub fn new(
        address: AccountAddress,
        module: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, ResourceTypeError> {
        let module = module.into();
        let name = name.into();
        validate_identifier(&module)?;
        validate_identifier(&name)?;
        Ok(Self {
            address,
            module,
            name,
        })
    }

    /// Human-readable resource name (the struct segment).
    pub fn struct_name(&self) -> &str {
        &self.name
    }
}

impl FromStr for ResourceType {
    type Err = ResourceTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split("::").collect();
        let [address, module, name] = parts.as_slice() else {
            return Err(ResourceTypeError::Malformed(s.to_string()));
        };
        Self::new(address.parse()?, *module, *name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.address, self.module, self.name)
    }
}

// ============================================================================
// Module Id
// ============================================================================

/// Module hosting the game's entry points (`<address>::<name>`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: String,
}

impl ModuleId {
    pub fn new(address: AccountAddress, name: impl Into<String>) -> Result<Self, ResourceTypeError> {
        let name = name.into();
        validate_identifier(&name)?;
        Ok(Self { address, name })
    }

    /// `<address>::<module>::<function>`
    pub fn function_id(&self, function: &str) -> String {
        format!("{}::{}::{}", self.address, self.name, function)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.address, self.name)
    }
}

// ============================================================================
// Serde
// ============================================================================

#[cfg(feature = "serde")]
mod serde_impls {
    use super::{AccountAddress, ResourceType};
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

    macro_rules! string_serde {
        ($ty:ty) => {
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let raw = String::deserialize(deserializer)?;
                    raw.parse().map_err(D::Error::custom)
                }
            }
        };
    }

    string_serde!(AccountAddress);
    string_serde!(ResourceType);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_addresses_compare_equal() {
        let short: AccountAddress = "0x1".parse().unwrap();
        let padded: AccountAddress =
            "0x0000000000000000000000000000000000000000000000000000000000000001"
                .parse()
                .unwrap();
        assert_eq!(short, padded);
        assert_eq!(
            short.to_string(),
            "0x0000000000000000000000000000000000000000000000000000000000000001"
        );
    }

    #[test]
    fn addresses_normalize_case() {
        let upper: AccountAddress = "0xABCDEF".parse().unwrap();
        let lower: AccountAddress = "abcdef".parse().unwrap();
        assert_eq!(upper, lower);
        assert!(upper.to_string().ends_with("abcdef"));
    }

    #[test]
    fn rejects_bad_addresses() {
        assert!("0x".parse::<AccountAddress>().is_err());
        assert!("0xzz".parse::<AccountAddress>().is_err());
        assert!(format!("0x{}", "1".repeat(65)).parse::<AccountAddress>().is_err());
    }

    #[test]
    fn resource_type_round_trips_through_display() {
        let ty: ResourceType = "0xcafe::coin3::T".parse().unwrap();
        assert_eq!(ty.struct_name(), "T");
        assert_eq!(ty.module, "coin3");
        assert_eq!(ty.to_string().parse::<ResourceType>().unwrap(), ty);
    }

    #[test]
    fn resource_type_requires_three_segments() {
        assert!(matches!(
            "0x1::coin".parse::<ResourceType>(),
            Err(ResourceTypeError::Malformed(_))
        ));
        assert!(matches!(
            "0x1::coin::T::U".parse::<ResourceType>(),
            Err(ResourceTypeError::Malformed(_))
        ));
        assert!(matches!(
            "0x1::9coin::T".parse::<ResourceType>(),
            Err(ResourceTypeError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn function_id_is_fully_qualified() {
        let module = ModuleId::new("0xcafe".parse().unwrap(), "pve_battles").unwrap();
        let id = module.function_id("buy_units");
        assert!(id.starts_with("0x000"));
        assert!(id.ends_with("cafe::pve_battles::buy_units"));
    }
}
