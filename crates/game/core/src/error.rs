//! Common error infrastructure for game-core.
//!
//! Every failure in this crate is a precondition failure: the caller handed
//! the encoder a selection or record that cannot become a valid entry-point
//! call. Nothing here is fatal to a session; the player fixes the input and
//! retries.
//!
//! Domain errors live next to the code that raises them ([`QuantityError`]
//! in `quantity`, [`ResourceTypeError`] in `resource`); the composer and
//! catalog errors are collected here because several modules share them.
//!
//! [`QuantityError`]: crate::quantity::QuantityError
//! [`ResourceTypeError`]: crate::resource::ResourceTypeError

use crate::catalog::UnitId;
use crate::quantity::QuantityError;
use crate::resource::{ResourceType, ResourceTypeError};

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: the input itself is wrong; retrying unchanged will fail again
/// - **Recoverable**: the input refers to data that may appear after a refresh
/// - **Internal**: an invariant the encoder relies on was broken upstream
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid or missing input; must be amended before retrying.
    Validation,

    /// Referenced record is unknown locally; a list refresh may resolve it.
    Recoverable,

    /// Upstream data violated an invariant (e.g. misaligned reward vectors).
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Recoverable => "recoverable",
            Self::Internal => "internal",
        }
    }

    /// Returns true if retrying after a refresh may succeed.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Classification shared by all encoder errors.
pub trait EncoderError: std::error::Error {
    fn severity(&self) -> ErrorSeverity;

    /// Stable machine-readable code for logs and UI lookups.
    fn error_code(&self) -> &'static str;
}

// ============================================================================
// Composition Errors
// ============================================================================

/// Precondition failures raised before any payload is built.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("no enemy level selected")]
    NoLevelSelected,

    #[error("no purchase contract selected")]
    NoContractSelected,

    #[error("no units selected")]
    NoUnitsCommitted,

    /// The on-chain program exposes attack entry points for at most two unit types.
    #[error("{count} unit types committed; at most 2 are supported per attack")]
    TooManyUnitTypes { count: usize },

    #[error("{count} reward resource types; a level pays out 1 or 2")]
    UnsupportedRewardCount { count: usize },

    #[error("reward resource {0} selected more than once")]
    DuplicateRewardType(ResourceType),

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("quantity {requested} outside the purchasable range 1..={max}")]
    QuantityOutOfRange { requested: u64, max: u64 },

    #[error("unit {0} not found in the current unit list")]
    UnknownUnit(UnitId),

    #[error("payment amount overflows u64")]
    AmountOverflow,

    #[error(transparent)]
    Quantity(#[from] QuantityError),
}

impl EncoderError for ComposeError {
    fn severity(&self) -> ErrorSeverity {
        use ComposeError::*;
        match self {
            UnknownUnit(_) => ErrorSeverity::Recoverable,
            NoLevelSelected | NoContractSelected | NoUnitsCommitted => ErrorSeverity::Validation,
            TooManyUnitTypes { .. } | UnsupportedRewardCount { .. } => ErrorSeverity::Validation,
            DuplicateRewardType(_) | MissingField(_) | QuantityOutOfRange { .. } => {
                ErrorSeverity::Validation
            }
            AmountOverflow | Quantity(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ComposeError::*;
        match self {
            NoLevelSelected => "COMPOSE_NO_LEVEL",
            NoContractSelected => "COMPOSE_NO_CONTRACT",
            NoUnitsCommitted => "COMPOSE_NO_UNITS",
            TooManyUnitTypes { .. } => "COMPOSE_TOO_MANY_UNIT_TYPES",
            UnsupportedRewardCount { .. } => "COMPOSE_REWARD_COUNT",
            DuplicateRewardType(_) => "COMPOSE_DUPLICATE_REWARD",
            MissingField(_) => "COMPOSE_MISSING_FIELD",
            QuantityOutOfRange { .. } => "COMPOSE_QUANTITY_RANGE",
            UnknownUnit(_) => "COMPOSE_UNKNOWN_UNIT",
            AmountOverflow => "COMPOSE_AMOUNT_OVERFLOW",
            Quantity(_) => "COMPOSE_QUANTITY",
        }
    }
}

// ============================================================================
// Catalog Errors
// ============================================================================

/// Invariant violations found while building catalog records from view data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("reward vectors misaligned: {types} types, {amounts} amounts")]
    RewardLengthMismatch { types: usize, amounts: usize },

    #[error("level defines {count} reward types; expected 1 or 2")]
    UnsupportedRewardCount { count: usize },

    #[error("invalid record id: {0:?}")]
    InvalidId(String),

    #[error(transparent)]
    ResourceType(#[from] ResourceTypeError),
}

impl EncoderError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Internal
    }

    fn error_code(&self) -> &'static str {
        match self {
            CatalogError::RewardLengthMismatch { .. } => "CATALOG_REWARD_MISMATCH",
            CatalogError::UnsupportedRewardCount { .. } => "CATALOG_REWARD_COUNT",
            CatalogError::InvalidId(_) => "CATALOG_INVALID_ID",
            CatalogError::ResourceType(_) => "CATALOG_RESOURCE_TYPE",
        }
    }
}
