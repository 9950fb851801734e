//! Aptos indexer (Hasura GraphQL) integration.
//!
//! The indexer aggregates fungible balances per owner, which the fullnode
//! REST API does not expose in one call. Only `current_coin_balances` is used.
//!
//! ## Modules
//!
//! - [`client`]: HTTP client issuing the balance query
//! - [`types`]: GraphQL envelope and row types

pub mod client;
pub mod types;

// Re-export primary types
pub use client::IndexerClient;
pub use types::{CoinBalanceRow, GraphQlResponse};
