//! Utility modules for Aptos integration.
//!
//! ## Modules
//!
//! - [`conversion`]: Move JSON value decoding (u64 strings, hex-encoded names)

pub mod conversion;

// Re-export commonly used items
pub use conversion::{hex_to_text, parse_u64};
