//! Conversions between the node's JSON encoding of Move values and Rust types.
//!
//! The REST API renders `u64` as decimal strings and `vector<u8>` as
//! `0x`-prefixed hex. The indexer renders numeric columns as JSON numbers.
//! Decoders here accept either form.

use serde::{Deserialize, Deserializer, de};

use crate::core::error::{AptosError, Result};

// ============================================================================
// Numbers
// ============================================================================

pub fn parse_u64(value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| AptosError::InvalidResponse(format!("not a u64: {value:?}")))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum U64Repr {
    Number(u64),
    Text(String),
}

/// Serde helper for `u64` fields that may arrive as a number or a string.
pub fn de_u64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    match U64Repr::deserialize(deserializer)? {
        U64Repr::Number(n) => Ok(n),
        U64Repr::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// [`de_u64`] for vectors.
pub fn de_u64_vec<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Vec<u64>, D::Error> {
    Vec::<U64Repr>::deserialize(deserializer)?
        .into_iter()
        .map(|repr| match repr {
            U64Repr::Number(n) => Ok(n),
            U64Repr::Text(s) => s.trim().parse().map_err(de::Error::custom),
        })
        .collect()
}

// ============================================================================
// Move byte strings
// ============================================================================

/// Decode a hex-encoded `vector<u8>` holding UTF-8 text, as used by
/// `type_info::TypeInfo` module and struct names.
pub fn hex_to_text(value: &str) -> Result<String> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(digits)
        .map_err(|e| AptosError::InvalidResponse(format!("invalid hex {value:?}: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| AptosError::InvalidResponse(format!("non-UTF-8 name {value:?}: {e}")))
}
