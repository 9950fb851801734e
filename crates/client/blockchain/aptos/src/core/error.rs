//! Error types for Aptos blockchain operations.

use client_blockchain_core::{QueryError, SubmissionError, TransactionHash, TransportError};
use thiserror::Error;

/// Errors that can occur during Aptos blockchain operations.
#[derive(Debug, Error)]
pub enum AptosError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Node responded with {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Transaction {hash} failed: {vm_status}")]
    TransactionFailed {
        hash: TransactionHash,
        vm_status: String,
    },

    #[error("Timed out waiting for transaction {0}")]
    Timeout(TransactionHash),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AptosError>;

impl From<reqwest::Error> for AptosError {
    fn from(err: reqwest::Error) -> Self {
        AptosError::Network(err.to_string())
    }
}

impl From<AptosError> for TransportError {
    fn from(err: AptosError) -> Self {
        match err {
            AptosError::Network(msg) => TransportError::NetworkError(msg),
            AptosError::Http { status, body } => TransportError::HttpStatus { status, body },
            AptosError::Timeout(hash) => TransportError::Timeout(hash),
            AptosError::InvalidConfig(msg) => TransportError::ConfigError(msg),
            AptosError::InvalidResponse(msg) => TransportError::SerializationError(msg),
            other => TransportError::BackendError(format!("{other:#}")),
        }
    }
}

impl From<AptosError> for QueryError {
    fn from(err: AptosError) -> Self {
        match err {
            AptosError::InvalidResponse(msg) => QueryError::InvalidData(msg),
            other => QueryError::TransportError(other.into()),
        }
    }
}

impl From<AptosError> for SubmissionError {
    fn from(err: AptosError) -> Self {
        match err {
            AptosError::TransactionFailed { hash, vm_status } => {
                SubmissionError::ExecutionFailed { hash, vm_status }
            }
            other => SubmissionError::TransportError(other.into()),
        }
    }
}
