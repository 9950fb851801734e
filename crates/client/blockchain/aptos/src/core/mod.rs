//! Core types and errors for Aptos integration.

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::{AptosError, Result};
pub use types::{TransactionResponse, ViewRequest};
