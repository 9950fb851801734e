//! Blockchain abstraction layer for the PvE battles client.
//!
//! This crate provides a layered blockchain abstraction for the game.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: GameBlockchain (composite trait)
//!          ├── CatalogReader
//!          ├── BalanceReader
//!          └── ActionSubmitter ── WalletSigner (injected)
//!
//! Layer 1: Domain Traits (game concepts)
//!
//! Layer 0: BlockchainTransport (pure infrastructure)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_core::GameBlockchain;
//!
//! async fn buy(chain: &dyn GameBlockchain, composer: &PayloadComposer, contract: &SelectedContract) {
//!     let payload = composer.purchase(Some(contract), 2, 10)?;
//!     let receipt = chain.submit(&payload).await?;
//!     let balances = chain.balances(&chain.player()).await?;
//! }
//! ```

pub mod traits;
pub mod types;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export all traits
pub use traits::{
    ActionSubmitter, BalanceReader, BlockchainTransport, CatalogReader, GameBlockchain,
    QueryError, SignerError, SubmissionError, TransportError, WalletSigner,
};

// Re-export all types
pub use types::{BlockchainConfig, TransactionHash, TransactionReceipt, TransactionStatus};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockBlockchainClient;
