//! Cross-frontend primitives for the PvE battles client.
//!
//! Houses the flow controller that sequences submissions against a
//! [`client_blockchain_core::GameBlockchain`], the message log, and frontend
//! configuration. CLI and future graphical clients drive the same controller.
pub mod config;
pub mod controller;
pub mod error;
pub mod message;
pub mod refresh;

pub use config::{FrontendConfig, MessageConfig};
pub use controller::{CatalogSnapshot, PvEController};
pub use error::FlowError;
pub use message::{MessageEntry, MessageLevel, MessageLog};
pub use refresh::RefreshScope;
