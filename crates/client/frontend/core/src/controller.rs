//! Flow controller for the purchase, attack and admin dialogs.
//!
//! [`PvEController`] owns the session's [`SelectionState`] and the latest
//! catalog snapshot. Every submitting operation follows the same sequence:
//! compose, hand to the chain (signer approval and finality), refresh the
//! affected lists concurrently, and only then clear the dialog's selection.
//! A failed submission leaves the selection untouched so the player can retry.
//!
//! State lives behind `std::sync::Mutex` and is never held across an
//! `.await`, so every method takes `&self`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use client_blockchain_core::{GameBlockchain, QueryError, TransactionReceipt};
use game_core::{
    ContractDraft, ContractId, EnemyLevel, EntryFunctionPayload, LevelDraft, LevelId,
    PayloadComposer, PurchaseContract, ResourceBalance, ResourceType, SCALE, SelectedContract,
    SelectedLevel, SelectionState, Totals, UnitDefinition, UnitDraft, UnitId, attackable_units,
    balance_for, max_affordable, total_cost, totals,
};
use rust_decimal::Decimal;

use crate::config::FrontendConfig;
use crate::error::FlowError;
use crate::message::{MessageEntry, MessageLevel, MessageLog};
use crate::refresh::RefreshScope;

/// Latest fetched copy of the game tables and the player's balances.
#[derive(Clone, Debug, Default)]
pub struct CatalogSnapshot {
    pub units: Vec<UnitDefinition>,
    pub contracts: Vec<PurchaseContract>,
    pub levels: Vec<EnemyLevel>,
    pub balances: Vec<ResourceBalance>,
}

impl CatalogSnapshot {
    /// Base units of `resource` held; 0 when absent.
    pub fn balance(&self, resource: &ResourceType) -> u64 {
        balance_for(&self.balances, resource).map_or(0, |b| b.amount)
    }
}

/// Holds the in-flight flag for the lifetime of one submission.
struct SubmissionGuard {
    flag: Arc<AtomicBool>,
}

impl SubmissionGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, FlowError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| FlowError::SubmissionInFlight)?;
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for SubmissionGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Session controller shared by every frontend.
///
/// Lock order is `selection` before `catalog`; `messages` is only taken
/// alone.
pub struct PvEController<B> {
    chain: B,
    composer: PayloadComposer,
    selection: Mutex<SelectionState>,
    catalog: Mutex<CatalogSnapshot>,
    messages: Mutex<MessageLog>,
    show_refresh_failures: bool,
    submitting: Arc<AtomicBool>,
}

impl<B: GameBlockchain> PvEController<B> {
    pub fn new(chain: B, composer: PayloadComposer, config: &FrontendConfig) -> Self {
        Self {
            chain,
            composer,
            selection: Mutex::new(SelectionState::new()),
            catalog: Mutex::new(CatalogSnapshot::default()),
            messages: Mutex::new(MessageLog::new(config.messages.capacity)),
            show_refresh_failures: config.messages.show_refresh_failures,
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn chain(&self) -> &B {
        &self.chain
    }

    pub fn composer(&self) -> &PayloadComposer {
        &self.composer
    }

    /// True while a transaction is awaiting approval or finality.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn catalog(&self) -> CatalogSnapshot {
        lock(&self.catalog).clone()
    }

    pub fn selection(&self) -> SelectionState {
        lock(&self.selection).clone()
    }

    /// Newest first.
    pub fn messages(&self, limit: usize) -> Vec<MessageEntry> {
        lock(&self.messages).recent(limit).cloned().collect()
    }

    fn push_message(&self, level: MessageLevel, version: Option<u64>, text: String) {
        lock(&self.messages).push(MessageEntry::new(text, version, level));
    }

    // ========================================================================
    // Refresh
    // ========================================================================

    pub async fn refresh_all(&self) {
        self.refresh(RefreshScope::all()).await;
    }

    /// Re-fetch the lists in `scope` concurrently. Failures keep the stale
    /// list and are reported, never returned.
    pub async fn refresh(&self, scope: RefreshScope) {
        let owner = self.chain.player();

        let units = async {
            if scope.contains(RefreshScope::UNITS) {
                let result = self.chain.units(&owner).await;
                self.store("units", result, |c| &mut c.units);
            }
        };
        let contracts = async {
            if scope.contains(RefreshScope::CONTRACTS) {
                let result = self.chain.contracts(&owner).await;
                self.store("contracts", result, |c| &mut c.contracts);
            }
        };
        let levels = async {
            if scope.contains(RefreshScope::LEVELS) {
                let result = self.chain.levels(&owner).await;
                self.store("levels", result, |c| &mut c.levels);
            }
        };
        let balances = async {
            if scope.contains(RefreshScope::BALANCES) {
                let result = self.chain.balances(&owner).await;
                self.store("balances", result, |c| &mut c.balances);
            }
        };

        tokio::join!(units, contracts, levels, balances);
    }

    fn store<T>(
        &self,
        list: &'static str,
        result: Result<Vec<T>, QueryError>,
        slot: impl FnOnce(&mut CatalogSnapshot) -> &mut Vec<T>,
    ) {
        match result {
            Ok(items) => {
                tracing::debug!(list, count = items.len(), "Refreshed");
                *slot(&mut *lock(&self.catalog)) = items;
            }
            Err(err) => {
                tracing::warn!(list, error = %err, "Refresh failed; keeping stale list");
                if self.show_refresh_failures {
                    self.push_message(
                        MessageLevel::Warning,
                        None,
                        format!("Could not refresh {list}: {err}"),
                    );
                }
            }
        }
    }

    // ========================================================================
    // Purchase flow
    // ========================================================================

    pub fn select_contract(&self, id: ContractId) -> Result<SelectedContract, FlowError> {
        let selected = {
            let catalog = lock(&self.catalog);
            let contract = catalog
                .contracts
                .iter()
                .find(|c| c.id == id)
                .ok_or(FlowError::UnknownContract(id))?;
            SelectedContract::resolve(contract, &catalog.units)
                .ok_or(FlowError::UnknownUnit(contract.unit_id))?
        };

        lock(&self.selection).select_contract(selected.clone());
        Ok(selected)
    }

    pub fn dismiss_contract(&self) {
        lock(&self.selection).dismiss_contract();
    }

    fn affordable_for(&self, contract: &SelectedContract) -> u64 {
        let balance = lock(&self.catalog).balance(&contract.payment);
        max_affordable(balance, Decimal::from(contract.fixed_price))
    }

    /// Upper bound of the quantity input; 0 without a selected contract.
    pub fn max_affordable(&self) -> u64 {
        let selection = lock(&self.selection);
        selection
            .contract()
            .map_or(0, |contract| self.affordable_for(contract))
    }

    /// Store `requested` clamped into `[1, max_affordable]`.
    pub fn set_purchase_quantity(&self, requested: u64) -> u64 {
        let mut selection = lock(&self.selection);
        let max = selection
            .contract()
            .map_or(0, |contract| self.affordable_for(contract));
        selection.set_purchase_quantity(requested, max)
    }

    /// Cost of the current quantity in the contract's price unit.
    pub fn total_cost(&self) -> Option<u128> {
        let selection = lock(&self.selection);
        selection
            .contract()
            .map(|contract| total_cost(selection.purchase_quantity(), contract.fixed_price))
    }

    pub fn prepare_purchase(&self) -> Result<EntryFunctionPayload, FlowError> {
        let selection = lock(&self.selection);
        let max = selection
            .contract()
            .map_or(0, |contract| self.affordable_for(contract));
        Ok(self
            .composer
            .purchase(selection.contract(), selection.purchase_quantity(), max)?)
    }

    pub async fn buy(&self) -> Result<TransactionReceipt, FlowError> {
        let payload = self.prepare_purchase()?;
        let submitted = lock(&self.selection).contract().map(|c| c.contract_id);
        // A contract picked while this one was pending survives.
        self.execute(payload, move |selection| {
            if selection.contract().map(|c| c.contract_id) == submitted {
                selection.dismiss_contract();
            }
        })
        .await
    }

    // ========================================================================
    // Attack flow
    // ========================================================================

    pub fn select_level(&self, id: LevelId) -> Result<SelectedLevel, FlowError> {
        let selected = {
            let catalog = lock(&self.catalog);
            let level = catalog
                .levels
                .iter()
                .find(|l| l.id == id)
                .ok_or(FlowError::UnknownLevel(id))?;
            SelectedLevel::from(level)
        };

        lock(&self.selection).select_level(selected.clone());
        Ok(selected)
    }

    pub fn dismiss_level(&self) {
        lock(&self.selection).dismiss_level();
    }

    /// Units the player holds, with the whole-unit upper bound of each.
    pub fn attackable_units(&self) -> Vec<(UnitDefinition, u64)> {
        let catalog = lock(&self.catalog);
        attackable_units(&catalog.units, &catalog.balances)
            .into_iter()
            .map(|attackable| (attackable.unit.clone(), attackable.max_units))
            .collect()
    }

    /// Whole units of `unit` the player holds.
    pub fn max_units(&self, unit: UnitId) -> Result<u64, FlowError> {
        let catalog = lock(&self.catalog);
        let definition = catalog
            .units
            .iter()
            .find(|u| u.id == unit)
            .ok_or(FlowError::UnknownUnit(unit))?;
        Ok(catalog.balance(&definition.linked_coin) / SCALE)
    }

    /// Commit `quantity` of `unit`, capped at holdings. Zero withdraws the
    /// unit. Returns the stored quantity.
    pub fn commit_units(&self, unit: UnitId, quantity: u64) -> Result<u64, FlowError> {
        let (resource, held) = {
            let catalog = lock(&self.catalog);
            let definition = catalog
                .units
                .iter()
                .find(|u| u.id == unit)
                .ok_or(FlowError::UnknownUnit(unit))?;
            let held = catalog.balance(&definition.linked_coin) / SCALE;
            (definition.linked_coin.clone(), held)
        };

        let stored = quantity.min(held);
        let mut selection = lock(&self.selection);
        if stored == 0 {
            selection.attack_mut().remove(unit);
        } else {
            selection.attack_mut().set(unit, stored, resource);
        }
        Ok(stored)
    }

    pub fn totals(&self) -> Totals {
        let selection = lock(&self.selection);
        let catalog = lock(&self.catalog);
        totals(selection.attack(), &catalog.units)
    }

    pub fn total_units(&self) -> u64 {
        lock(&self.selection).attack().total_units()
    }

    pub fn prepare_attack(&self) -> Result<EntryFunctionPayload, FlowError> {
        let selection = lock(&self.selection);
        Ok(self.composer.attack(selection.level(), selection.attack())?)
    }

    pub async fn attack(&self) -> Result<TransactionReceipt, FlowError> {
        let payload = self.prepare_attack()?;
        let submitted = lock(&self.selection).level().map(|l| l.level_id);
        self.execute(payload, move |selection| {
            if selection.level().map(|l| l.level_id) == submitted {
                selection.dismiss_level();
            }
        })
        .await
    }

    // ========================================================================
    // Starter resources & admin
    // ========================================================================

    /// Offered to players holding no balances at all.
    pub fn needs_starter_resources(&self) -> bool {
        lock(&self.catalog).balances.is_empty()
    }

    pub async fn mint_coins(&self) -> Result<TransactionReceipt, FlowError> {
        let payload = self.composer.mint_coins();
        self.execute(payload, |_| {}).await
    }

    /// Register the resource backing the next unit. Must finalize before
    /// [`create_unit`](Self::create_unit).
    pub async fn create_unit_type(&self) -> Result<TransactionReceipt, FlowError> {
        let unit_count = lock(&self.catalog).units.len();
        let payload = self.composer.create_unit_type(unit_count);
        self.execute(payload, |_| {}).await
    }

    pub async fn create_unit(&self, draft: &UnitDraft) -> Result<TransactionReceipt, FlowError> {
        let unit_count = lock(&self.catalog).units.len();
        let payload = self.composer.create_unit(draft, unit_count)?;
        self.execute(payload, |_| {}).await
    }

    pub async fn create_contract(
        &self,
        draft: &ContractDraft,
    ) -> Result<TransactionReceipt, FlowError> {
        let payload = {
            let catalog = lock(&self.catalog);
            self.composer.create_contract(draft, &catalog.units)?
        };
        self.execute(payload, |_| {}).await
    }

    pub async fn create_level(&self, draft: &LevelDraft) -> Result<TransactionReceipt, FlowError> {
        let payload = self.composer.create_level(draft)?;
        self.execute(payload, |_| {}).await
    }

    pub async fn remove_contract(&self, id: ContractId) -> Result<TransactionReceipt, FlowError> {
        let known = lock(&self.catalog).contracts.iter().any(|c| c.id == id);
        if !known {
            return Err(FlowError::UnknownContract(id));
        }

        let payload = self.composer.remove_contract(id);
        self.execute(payload, move |selection| {
            if selection.contract().is_some_and(|c| c.contract_id == id) {
                selection.dismiss_contract();
            }
        })
        .await
    }

    pub async fn remove_level(&self, id: LevelId) -> Result<TransactionReceipt, FlowError> {
        let known = lock(&self.catalog).levels.iter().any(|l| l.id == id);
        if !known {
            return Err(FlowError::UnknownLevel(id));
        }

        let payload = self.composer.remove_level(id);
        self.execute(payload, move |selection| {
            if selection.level().is_some_and(|l| l.level_id == id) {
                selection.dismiss_level();
            }
        })
        .await
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Submit, wait for finality, refresh, then apply `on_success` to the
    /// selection.
    async fn execute<F>(
        &self,
        payload: EntryFunctionPayload,
        on_success: F,
    ) -> Result<TransactionReceipt, FlowError>
    where
        F: FnOnce(&mut SelectionState),
    {
        let _guard = SubmissionGuard::acquire(&self.submitting)?;
        let function = payload.function;
        tracing::info!(%function, chain = self.chain.name(), "Submitting transaction");

        let receipt = match self.chain.submit(&payload).await {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(%function, error = %err, "Submission failed; selection kept");
                self.push_message(MessageLevel::Error, None, format!("{function} failed: {err}"));
                return Err(err.into());
            }
        };

        tracing::info!(
            %function,
            hash = %receipt.hash,
            version = receipt.version,
            "Transaction finalized"
        );
        self.push_message(
            MessageLevel::Info,
            Some(receipt.version),
            format!("{function} committed"),
        );

        self.refresh(RefreshScope::after(function)).await;
        on_success(&mut *lock(&self.selection));
        Ok(receipt)
    }
}
