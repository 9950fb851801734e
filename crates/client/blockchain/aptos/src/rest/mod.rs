//! Aptos fullnode REST API.
//!
//! Only the endpoints the game needs:
//! - `POST /view` for the read-only table dumps
//! - `GET /transactions/wait_by_hash/{hash}` and `/transactions/by_hash/{hash}`
//!   to follow a submitted transaction to finality
//! - `GET /-/healthy`

pub mod client;

pub use client::NodeClient;
