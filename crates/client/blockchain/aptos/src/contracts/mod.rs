//! Aptos Move contract integrations.
//!
//! Each contract is represented as a struct with methods corresponding to
//! on-chain function calls. Entry-function payloads themselves are composed in
//! `game-core`; this layer owns view calls and record decoding.

pub mod pve_battles;

// Re-export contract types
pub use pve_battles::{PveBattlesContract, ViewFunction};
