//! Common types for blockchain interactions.

use std::fmt;

use game_core::EntryFunction;
use serde::{Deserialize, Serialize};

/// Hash identifying a submitted transaction (`0x`-prefixed hex on Aptos).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHash(pub String);

impl TransactionHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Transaction status on the blockchain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Transaction is pending in mempool
    Pending,

    /// Transaction executed successfully at the given ledger version
    Committed { version: u64 },

    /// Transaction was committed but aborted during execution
    Failed { vm_status: String },
}

impl TransactionStatus {
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Outcome of a finalized, successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionReceipt {
    pub hash: TransactionHash,

    /// Entry point that was invoked
    pub function: EntryFunction,

    /// Ledger version the transaction was committed at
    pub version: u64,

    pub gas_used: u64,
}

/// Blockchain-specific configuration.
///
/// This is a trait to allow different blockchains to provide their own config types.
pub trait BlockchainConfig: Send + Sync {
    /// Human-readable network name (e.g., "aptos-devnet")
    fn network_name(&self) -> &str;

    /// Fullnode REST endpoint URL
    fn rpc_url(&self) -> &str;

    /// Validate configuration (addresses, URLs, timeouts)
    fn validate(&self) -> Result<(), String>;
}
