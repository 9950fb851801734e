//! Errors surfaced by the flow controller.

use client_blockchain_core::SubmissionError;
use game_core::{ComposeError, ContractId, EncoderError, ErrorSeverity, LevelId, UnitId};

/// Failure of a player or admin action.
///
/// Precondition failures are reported before anything reaches the wallet.
/// Submission failures leave the selection intact so the action can be
/// retried. No variant ends the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error(transparent)]
    Precondition(#[from] ComposeError),

    #[error(transparent)]
    Submission(#[from] SubmissionError),

    #[error("another transaction is still pending")]
    SubmissionInFlight,

    #[error("contract {0} is not in the current contract list")]
    UnknownContract(ContractId),

    #[error("level {0} is not in the current level list")]
    UnknownLevel(LevelId),

    #[error("unit {0} is not in the current unit list")]
    UnknownUnit(UnitId),
}

impl FlowError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Precondition(err) => err.severity(),
            _ => ErrorSeverity::Recoverable,
        }
    }

    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Precondition(_))
    }
}
