//! Blockchain abstraction traits.
//!
//! This module defines a layered blockchain abstraction:
//! - Layer 0: BlockchainTransport (pure infrastructure)
//! - Layer 1: WalletSigner, CatalogReader, BalanceReader, ActionSubmitter (game domain)
//! - Layer 2: GameBlockchain (composite trait)

use async_trait::async_trait;
use game_core::{
    AccountAddress, CatalogError, EnemyLevel, EntryFunctionPayload, PurchaseContract,
    ResourceBalance, UnitDefinition,
};

use crate::types::{TransactionHash, TransactionReceipt, TransactionStatus};

// ============================================================================
// Error Types
// ============================================================================

/// Transport layer errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Timed out waiting for transaction {0}")]
    Timeout(TransactionHash),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Backend-specific error: {0}")]
    BackendError(String),
}

/// Read-side errors for view calls and the balance indexer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("Unexpected response shape: {0}")]
    InvalidData(String),

    #[error("Invalid catalog record: {0}")]
    Catalog(#[from] CatalogError),
}

/// Wallet failures. The wallet owns the keys; this side only sees outcomes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignerError {
    #[error("Player rejected the transaction")]
    Rejected,

    #[error("No wallet connected")]
    NotConnected,

    #[error("Wallet error: {0}")]
    Backend(String),
}

/// Submission errors: signing, transport, or on-chain execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Signer error: {0}")]
    Signer(#[from] SignerError),

    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),

    #[error("Transaction {hash} failed: {vm_status}")]
    ExecutionFailed {
        hash: TransactionHash,
        vm_status: String,
    },
}

// ============================================================================
// Layer 0: Pure Infrastructure
// ============================================================================

/// Pure blockchain infrastructure layer.
///
/// This trait provides low-level blockchain operations without any game-specific knowledge.
#[async_trait]
pub trait BlockchainTransport: Send + Sync {
    /// Query transaction status once.
    async fn transaction_status(
        &self,
        hash: &TransactionHash,
    ) -> Result<TransactionStatus, TransportError>;

    /// Block until the transaction leaves the mempool or the node gives up.
    async fn wait_for_transaction(
        &self,
        hash: &TransactionHash,
    ) -> Result<TransactionStatus, TransportError>;

    /// Health check: verify connection to blockchain.
    async fn health_check(&self) -> Result<(), TransportError>;
}

// ============================================================================
// Layer 1: Game Domain Traits
// ============================================================================

/// External wallet.
///
/// Accepts a composed payload, asks the player to approve it, and returns
/// the hash of the submitted transaction. Never exposes keys.
#[async_trait]
pub trait WalletSigner: Send + Sync {
    async fn sign_and_submit(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<TransactionHash, SignerError>;
}

/// Full snapshots of the game's on-chain tables.
#[async_trait]
pub trait CatalogReader: Send + Sync {
    async fn units(&self, owner: &AccountAddress) -> Result<Vec<UnitDefinition>, QueryError>;

    async fn contracts(&self, owner: &AccountAddress)
    -> Result<Vec<PurchaseContract>, QueryError>;

    async fn levels(&self, owner: &AccountAddress) -> Result<Vec<EnemyLevel>, QueryError>;
}

/// Non-zero fungible balances, excluding the native gas coin.
#[async_trait]
pub trait BalanceReader: Send + Sync {
    async fn balances(&self, owner: &AccountAddress) -> Result<Vec<ResourceBalance>, QueryError>;
}

/// Signs a payload and waits for it to finalize.
#[async_trait]
pub trait ActionSubmitter: Send + Sync {
    async fn submit(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<TransactionReceipt, SubmissionError>;
}

// ============================================================================
// Layer 2: Composite Trait
// ============================================================================

/// Core game blockchain operations.
///
/// All game-compatible blockchains must implement this trait.
/// This is a composite of required domain traits.
pub trait GameBlockchain: CatalogReader + BalanceReader + ActionSubmitter + Send + Sync {
    /// Get the blockchain name (e.g., "Aptos").
    fn name(&self) -> &str;

    /// Get the network name (e.g., "devnet", "testnet", "local").
    fn network(&self) -> &str;

    /// Account whose tables and balances are read.
    fn player(&self) -> AccountAddress;
}
