//! Mock blockchain client for testing.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use game_core::{
    AccountAddress, ContractId, EnemyLevel, EntryFunction, EntryFunctionPayload, LevelId,
    MoveValue, PurchaseContract, ResourceBalance, ResourceType, SCALE, UnitDefinition, UnitId,
};
use tracing::debug;

use crate::traits::{
    ActionSubmitter, BalanceReader, CatalogReader, GameBlockchain, QueryError, SubmissionError,
};
use crate::types::{TransactionHash, TransactionReceipt};

/// Human units credited per payment resource by `mint_coins`.
const MINT_GRANT: u64 = 100;

#[derive(Default)]
struct MockState {
    units: Vec<UnitDefinition>,
    contracts: Vec<PurchaseContract>,
    levels: Vec<EnemyLevel>,
    balances: Vec<ResourceBalance>,
    submitted: Vec<EntryFunctionPayload>,
    queries: Vec<&'static str>,
    version: u64,
    fail_next_submission: Option<SubmissionError>,
    fail_queries: Option<QueryError>,
    submit_delay: Option<Duration>,
}

/// Mock blockchain client for testing without network.
///
/// Keeps the game tables in memory and applies a simplified version of each
/// entry function on submit.
#[derive(Clone)]
pub struct MockBlockchainClient {
    player: AccountAddress,
    state: Arc<Mutex<MockState>>,
}

impl MockBlockchainClient {
    pub fn new(player: AccountAddress) -> Self {
        Self {
            player,
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap()
    }

    pub fn with_units(self, units: Vec<UnitDefinition>) -> Self {
        self.state().units = units;
        self
    }

    pub fn with_contracts(self, contracts: Vec<PurchaseContract>) -> Self {
        self.state().contracts = contracts;
        self
    }

    pub fn with_levels(self, levels: Vec<EnemyLevel>) -> Self {
        self.state().levels = levels;
        self
    }

    pub fn with_balances(self, balances: Vec<ResourceBalance>) -> Self {
        self.state().balances = balances;
        self
    }

    /// Delay every submission, to observe in-flight behaviour.
    pub fn with_submit_delay(self, delay: Duration) -> Self {
        self.state().submit_delay = Some(delay);
        self
    }

    /// The next `submit` returns `error` and leaves state untouched.
    pub fn fail_next_submission(&self, error: SubmissionError) {
        self.state().fail_next_submission = Some(error);
    }

    /// Every read returns `error` until cleared with `None`.
    pub fn fail_queries(&self, error: Option<QueryError>) {
        self.state().fail_queries = error;
    }

    /// Payloads that finalized successfully, in order.
    pub fn submitted(&self) -> Vec<EntryFunctionPayload> {
        self.state().submitted.clone()
    }

    /// Names of the reads served so far (`units`, `contracts`, `levels`, `balances`).
    pub fn queries(&self) -> Vec<&'static str> {
        self.state().queries.clone()
    }

    pub fn balance_of(&self, resource: &ResourceType) -> u64 {
        self.state()
            .balances
            .iter()
            .find(|b| &b.resource == resource)
            .map_or(0, |b| b.amount)
    }

    fn read<T>(
        &self,
        name: &'static str,
        select: impl FnOnce(&MockState) -> Vec<T>,
    ) -> Result<Vec<T>, QueryError> {
        let mut state = self.state();
        if let Some(err) = state.fail_queries.clone() {
            return Err(err);
        }
        state.queries.push(name);
        Ok(select(&state))
    }
}

// ============================================================================
// Simulated entry functions
// ============================================================================

fn failed(vm_status: &str) -> SubmissionError {
    SubmissionError::ExecutionFailed {
        hash: TransactionHash::new("0xmock"),
        vm_status: vm_status.to_string(),
    }
}

fn arg_u64(payload: &EntryFunctionPayload, index: usize) -> Result<u64, SubmissionError> {
    payload
        .arguments
        .get(index)
        .and_then(MoveValue::as_u64)
        .ok_or_else(|| failed("NUMBER_OF_ARGUMENTS_MISMATCH"))
}

fn arg_string(payload: &EntryFunctionPayload, index: usize) -> Result<String, SubmissionError> {
    match payload.arguments.get(index) {
        Some(MoveValue::String(s)) => Ok(s.clone()),
        _ => Err(failed("NUMBER_OF_ARGUMENTS_MISMATCH")),
    }
}

fn type_arg(payload: &EntryFunctionPayload, index: usize) -> Result<ResourceType, SubmissionError> {
    payload
        .type_arguments
        .get(index)
        .cloned()
        .ok_or_else(|| failed("NUMBER_OF_TYPE_ARGUMENTS_MISMATCH"))
}

impl MockState {
    fn credit(&mut self, resource: &ResourceType, amount: u64) {
        match self.balances.iter_mut().find(|b| &b.resource == resource) {
            Some(balance) => balance.amount = balance.amount.saturating_add(amount),
            None => self.balances.push(ResourceBalance {
                resource: resource.clone(),
                name: resource.struct_name().to_string(),
                symbol: resource.struct_name().to_uppercase(),
                amount,
            }),
        }
    }

    fn debit(&mut self, resource: &ResourceType, amount: u64) -> Result<(), SubmissionError> {
        let balance = self
            .balances
            .iter_mut()
            .find(|b| &b.resource == resource && b.amount >= amount)
            .ok_or_else(|| failed("EINSUFFICIENT_BALANCE"))?;
        balance.amount -= amount;
        self.balances.retain(|b| b.amount > 0);
        Ok(())
    }

    fn apply(&mut self, payload: &EntryFunctionPayload) -> Result<(), SubmissionError> {
        use EntryFunction::*;

        match payload.function {
            MintCoins => {
                let payments: Vec<_> = self.contracts.iter().map(|c| c.payment.clone()).collect();
                for resource in payments {
                    self.credit(&resource, MINT_GRANT * SCALE);
                }
            }
            CreateUnitType => {}
            CreateUnit => {
                let id = UnitId(self.units.len() as u64 + 1);
                self.units.push(UnitDefinition {
                    id,
                    name: arg_string(payload, 0)?,
                    description: arg_string(payload, 1)?,
                    image_url: arg_string(payload, 2)?,
                    attack: arg_u64(payload, 3)?,
                    health: arg_u64(payload, 4)?,
                    linked_coin: type_arg(payload, 0)?,
                });
            }
            CreateUnitContract => {
                let id = ContractId(self.contracts.iter().map(|c| c.id.0).max().unwrap_or(0) + 1);
                self.contracts.push(PurchaseContract {
                    id,
                    unit_id: UnitId(arg_u64(payload, 0)?),
                    unit_type: type_arg(payload, 1)?,
                    payment: type_arg(payload, 0)?,
                    fixed_price: arg_u64(payload, 1)?,
                });
            }
            CreateEnemyLevel | CreateEnemyLevelWithTwoRewardCoins => {
                let id = LevelId(self.levels.iter().map(|l| l.id.0).max().unwrap_or(0) + 1);
                let reward_types = payload.type_arguments.clone();
                let reward_amounts = payload
                    .arguments
                    .get(3..)
                    .unwrap_or_default()
                    .iter()
                    .filter_map(MoveValue::as_u64)
                    .collect();
                let level = EnemyLevel::new(
                    id,
                    arg_string(payload, 0)?,
                    arg_u64(payload, 1)?,
                    arg_u64(payload, 2)?,
                    reward_types,
                    reward_amounts,
                )
                .map_err(|e| failed(&e.to_string()))?;
                self.levels.push(level);
            }
            RemoveUnitContract => {
                let id = ContractId(arg_u64(payload, 0)?);
                self.contracts.retain(|c| c.id != id);
            }
            RemoveEnemyLevel => {
                let id = LevelId(arg_u64(payload, 0)?);
                self.levels.retain(|l| l.id != id);
            }
            BuyUnits => {
                let payment = type_arg(payload, 0)?;
                let unit = type_arg(payload, 1)?;
                let amount = arg_u64(payload, 1)?;
                let quantity = arg_u64(payload, 2)?;
                self.debit(&payment, amount)?;
                self.credit(&unit, quantity.saturating_mul(SCALE));
            }
            AttackEnemyWithOneUnitOneReward
            | AttackEnemyWithOneUnitTwoReward
            | AttackEnemyWithTwoUnitsOneReward
            | AttackEnemyWithTwoUnitsTwoReward => {
                let level_id = LevelId(arg_u64(payload, 0)?);
                let level = self
                    .levels
                    .iter()
                    .find(|l| l.id == level_id)
                    .cloned()
                    .ok_or_else(|| failed("ELEVEL_NOT_FOUND"))?;

                let rewards = level.rewards().len();
                let units = payload.type_arguments.len().saturating_sub(rewards);
                for i in 0..units {
                    let resource = type_arg(payload, rewards + i)?;
                    self.debit(&resource, arg_u64(payload, 1 + i)?)?;
                }
                for reward in level.rewards() {
                    self.credit(&reward.resource, reward.amount.saturating_mul(SCALE));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

#[async_trait]
impl CatalogReader for MockBlockchainClient {
    async fn units(&self, _owner: &AccountAddress) -> Result<Vec<UnitDefinition>, QueryError> {
        self.read("units", |s| s.units.clone())
    }

    async fn contracts(
        &self,
        _owner: &AccountAddress,
    ) -> Result<Vec<PurchaseContract>, QueryError> {
        self.read("contracts", |s| s.contracts.clone())
    }

    async fn levels(&self, _owner: &AccountAddress) -> Result<Vec<EnemyLevel>, QueryError> {
        self.read("levels", |s| s.levels.clone())
    }
}

#[async_trait]
impl BalanceReader for MockBlockchainClient {
    async fn balances(&self, _owner: &AccountAddress) -> Result<Vec<ResourceBalance>, QueryError> {
        self.read("balances", |s| s.balances.clone())
    }
}

#[async_trait]
impl ActionSubmitter for MockBlockchainClient {
    async fn submit(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<TransactionReceipt, SubmissionError> {
        let delay = self.state().submit_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.state();
        if let Some(err) = state.fail_next_submission.take() {
            return Err(err);
        }

        // Entry functions abort atomically.
        let balances = state.balances.clone();
        if let Err(err) = state.apply(payload) {
            state.balances = balances;
            debug!(function = ?payload.function, error = %err, "Simulated abort");
            return Err(err);
        }
        state.version += 1;
        state.submitted.push(payload.clone());

        Ok(TransactionReceipt {
            hash: TransactionHash::new(format!("0x{:064x}", state.version)),
            function: payload.function,
            version: state.version,
            gas_used: 1000,
        })
    }
}

impl GameBlockchain for MockBlockchainClient {
    fn name(&self) -> &str {
        "MockBlockchain"
    }

    fn network(&self) -> &str {
        "mock-network"
    }

    fn player(&self) -> AccountAddress {
        self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{AttackSelection, ModuleId, PayloadComposer, SelectedContract, SelectedLevel};

    fn resource(s: &str) -> ResourceType {
        s.parse().unwrap()
    }

    fn fixture() -> (MockBlockchainClient, PayloadComposer, UnitDefinition, PurchaseContract) {
        let player: AccountAddress = "0xa11ce".parse().unwrap();
        let unit = UnitDefinition {
            id: UnitId(1),
            name: "Knight".into(),
            description: "Armored".into(),
            image_url: "https://img/knight.png".into(),
            attack: 5,
            health: 10,
            linked_coin: resource("0xcafe::coin1::T"),
        };
        let contract = PurchaseContract {
            id: ContractId(1),
            unit_id: unit.id,
            unit_type: unit.linked_coin.clone(),
            payment: resource("0xcafe::gold::Gold"),
            fixed_price: 2,
        };
        let client = MockBlockchainClient::new(player)
            .with_units(vec![unit.clone()])
            .with_contracts(vec![contract.clone()]);
        let composer =
            PayloadComposer::new(ModuleId::new("0xcafe".parse().unwrap(), "pve_battles").unwrap());
        (client, composer, unit, contract)
    }

    #[tokio::test]
    async fn mint_then_buy_moves_balances() {
        let (client, composer, unit, contract) = fixture();

        client.submit(&composer.mint_coins()).await.unwrap();
        assert_eq!(client.balance_of(&contract.payment), 100 * SCALE);

        let selected = SelectedContract::resolve(&contract, &[unit.clone()]).unwrap();
        let receipt = client
            .submit(&composer.purchase(Some(&selected), 3, 50).unwrap())
            .await
            .unwrap();
        assert_eq!(receipt.function, EntryFunction::BuyUnits);
        assert_eq!(receipt.version, 2);

        assert_eq!(client.balance_of(&unit.linked_coin), 3 * SCALE);
        assert_eq!(client.balance_of(&contract.payment), 94 * SCALE);
    }

    #[tokio::test]
    async fn injected_failure_leaves_state_untouched() {
        let (client, composer, _, contract) = fixture();
        client.fail_next_submission(SubmissionError::Signer(crate::SignerError::Rejected));

        let err = client.submit(&composer.mint_coins()).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Signer(_)));
        assert_eq!(client.balance_of(&contract.payment), 0);
        assert!(client.submitted().is_empty());
    }

    #[tokio::test]
    async fn insufficient_balance_aborts() {
        let (client, composer, unit, contract) = fixture();
        let selected = SelectedContract::resolve(&contract, &[unit]).unwrap();

        let err = client
            .submit(&composer.purchase(Some(&selected), 1, 1).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::ExecutionFailed { .. }));
    }

    #[tokio::test]
    async fn aborted_attack_keeps_every_balance() {
        let (client, composer, knight, _) = fixture();
        let archer = UnitDefinition {
            id: UnitId(2),
            name: "Archer".into(),
            linked_coin: resource("0xcafe::coin2::T"),
            ..knight.clone()
        };
        let gold = resource("0xcafe::gold::Gold");
        let level = EnemyLevel::new(LevelId(1), "Goblin", 10, 20, vec![gold.clone()], vec![5])
            .unwrap();
        let client = client.with_levels(vec![level.clone()]).with_balances(vec![
            ResourceBalance {
                resource: knight.linked_coin.clone(),
                name: "Knight".into(),
                symbol: "KNT".into(),
                amount: 5 * SCALE,
            },
            ResourceBalance {
                resource: archer.linked_coin.clone(),
                name: "Archer".into(),
                symbol: "ARC".into(),
                amount: SCALE,
            },
        ]);

        // Knights are debited first; archers then fall short.
        let mut selection = AttackSelection::new();
        selection.set(knight.id, 2, knight.linked_coin.clone());
        selection.set(archer.id, 3, archer.linked_coin.clone());
        let payload = composer
            .attack(Some(&SelectedLevel::from(&level)), &selection)
            .unwrap();

        let err = client.submit(&payload).await.unwrap_err();
        assert!(matches!(err, SubmissionError::ExecutionFailed { .. }));
        assert_eq!(client.balance_of(&knight.linked_coin), 5 * SCALE);
        assert_eq!(client.balance_of(&archer.linked_coin), SCALE);
        assert_eq!(client.balance_of(&gold), 0);
        assert!(client.submitted().is_empty());
    }

    #[tokio::test]
    async fn reads_are_logged_and_can_fail() {
        let (client, _, _, _) = fixture();
        let player = client.player();

        assert_eq!(client.units(&player).await.unwrap().len(), 1);
        client.fail_queries(Some(QueryError::InvalidData("down".into())));
        assert!(client.balances(&player).await.is_err());
        assert_eq!(client.queries(), vec!["units"]);

        assert_eq!(client.name(), "MockBlockchain");
        assert_eq!(client.network(), "mock-network");
    }
}
