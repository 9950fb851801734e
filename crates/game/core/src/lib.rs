//! Deterministic encoder for the PvE battles game.
//!
//! `game-core` turns the player's selections into entry-function payloads for
//! the on-chain `pve_battles` module. It performs no I/O: callers fetch the
//! catalog, hand selections to [`PayloadComposer`], and pass the resulting
//! [`EntryFunctionPayload`] to a signer.
//!
//! Amounts cross the boundary in two forms. Quantities the player types are
//! whole units or [`rust_decimal::Decimal`]; the ledger stores base units
//! (`human × 10^8`). See [`quantity`] for the conversion and [`composer`] for
//! where each form is used.
pub mod affordability;
pub mod catalog;
pub mod composer;
pub mod draft;
pub mod error;
pub mod payload;
pub mod quantity;
pub mod resource;
pub mod selection;
pub mod totals;
pub mod variant;

pub use affordability::{clamp_quantity, max_affordable, total_cost, validate_quantity};
pub use catalog::{
    AttackableUnit, ContractId, EnemyLevel, LevelId, PurchaseContract, ResourceBalance, Reward,
    SelectedContract, SelectedLevel, UnitDefinition, UnitId, attackable_units, balance_for,
};
pub use composer::PayloadComposer;
pub use draft::{ContractDraft, LevelDraft, UnitDraft};
pub use error::{CatalogError, ComposeError, EncoderError, ErrorSeverity};
pub use payload::{EntryFunction, EntryFunctionPayload, MoveValue};
pub use quantity::{DECIMALS, QuantityError, SCALE, format_human, to_base_units, to_human, units_to_base};
pub use resource::{AccountAddress, ModuleId, ResourceType, ResourceTypeError};
pub use selection::{AttackSelection, Commitment, SelectionState};
pub use totals::{Totals, totals};
pub use variant::{
    AttackVariant, LevelVariant, RewardArity, UnitArity, select_attack, select_level_creation,
};
