//! Aptos blockchain integration for the PvE battles game.
//!
//! This crate implements the `client-blockchain-core` traits against an Aptos
//! fullnode and its indexer:
//! - Catalog tables via `POST /view` on the `pve_battles` module
//! - Fungible balances via the indexer's `current_coin_balances`
//! - Submission via an injected wallet, then polling for finality
//!
//! # Architecture
//!
//! ```text
//! game-core (EntryFunctionPayload) → WalletSigner → fullnode
//!                                                      ↓
//! AptosBlockchainClient ← NodeClient (view, wait_by_hash)
//!                       ← IndexerClient (GraphQL balances)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use client_blockchain_aptos::{AptosBlockchainClient, AptosConfig};
//! use client_blockchain_core::{CatalogReader, GameBlockchain};
//!
//! let config = AptosConfig::from_env()?;
//! let client = AptosBlockchainClient::new(config)?.with_signer(wallet);
//!
//! let levels = client.levels(&client.player()).await?;
//! ```

pub mod client;
pub mod config;
pub mod contracts;
pub mod core;
pub mod indexer;
pub mod rest;
pub mod utils;

pub use client::AptosBlockchainClient;
pub use config::{AptosConfig, AptosNetwork, DEFAULT_MODULE_NAME};
pub use contracts::{PveBattlesContract, ViewFunction};
pub use self::core::{AptosError, Result};
