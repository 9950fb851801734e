//! Aptos blockchain client implementation.

use std::sync::Arc;

use anyhow::{Result, anyhow};
use async_trait::async_trait;

use client_blockchain_core::{
    ActionSubmitter, BalanceReader, BlockchainConfig, BlockchainTransport, CatalogReader,
    GameBlockchain, QueryError, SignerError, SubmissionError, TransactionHash, TransactionReceipt,
    TransactionStatus, TransportError, WalletSigner,
};
use game_core::{
    AccountAddress, EnemyLevel, EntryFunctionPayload, PayloadComposer, PurchaseContract,
    ResourceBalance, UnitDefinition,
};

use crate::config::AptosConfig;
use crate::contracts::{PveBattlesContract, ViewFunction};
use crate::indexer::IndexerClient;
use crate::rest::NodeClient;

/// Aptos blockchain client.
///
/// Reads the game tables through fullnode view calls, balances through the
/// indexer, and submits payloads through an injected [`WalletSigner`].
pub struct AptosBlockchainClient {
    config: AptosConfig,
    node: NodeClient,
    indexer: IndexerClient,
    contract: PveBattlesContract,
    player: AccountAddress,

    /// Absent until a wallet is connected; submissions fail with
    /// [`SignerError::NotConnected`] meanwhile.
    signer: Option<Arc<dyn WalletSigner>>,
}

impl AptosBlockchainClient {
    /// Create a new Aptos blockchain client.
    ///
    /// # Errors
    ///
    /// Returns error if configuration is invalid or no player address is set.
    pub fn new(config: AptosConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

        let player = config
            .player_address
            .ok_or_else(|| anyhow!("PVE_PLAYER_ADDRESS is required"))?;
        let module = config.module_id()?;

        let node = NodeClient::new(config.get_node_url(), config.tx_timeout)?;
        let indexer = IndexerClient::new(config.get_indexer_url())?;

        tracing::info!(
            network = config.network.as_str(),
            module = %module,
            player = %player,
            "Aptos client ready"
        );

        Ok(Self {
            contract: PveBattlesContract::new(module),
            config,
            node,
            indexer,
            player,
            signer: None,
        })
    }

    /// Attach the wallet used for submissions.
    pub fn with_signer(mut self, signer: Arc<dyn WalletSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn config(&self) -> &AptosConfig {
        &self.config
    }

    /// Composer bound to the configured game module.
    pub fn composer(&self) -> PayloadComposer {
        PayloadComposer::new(self.contract.module().clone())
    }

    async fn view(
        &self,
        function: ViewFunction,
        owner: &AccountAddress,
    ) -> Result<Vec<serde_json::Value>, QueryError> {
        let request = self.contract.view_request(function, owner);
        Ok(self.node.view(&request).await?)
    }
}

#[async_trait]
impl CatalogReader for AptosBlockchainClient {
    async fn units(&self, owner: &AccountAddress) -> Result<Vec<UnitDefinition>, QueryError> {
        let values = self.view(ViewFunction::GetAllUnits, owner).await?;
        PveBattlesContract::decode_units(values)
    }

    async fn contracts(
        &self,
        owner: &AccountAddress,
    ) -> Result<Vec<PurchaseContract>, QueryError> {
        let values = self.view(ViewFunction::GetAllUnitContracts, owner).await?;
        PveBattlesContract::decode_contracts(values)
    }

    async fn levels(&self, owner: &AccountAddress) -> Result<Vec<EnemyLevel>, QueryError> {
        let values = self.view(ViewFunction::GetAllEnemyLevels, owner).await?;
        PveBattlesContract::decode_levels(values)
    }
}

#[async_trait]
impl BalanceReader for AptosBlockchainClient {
    async fn balances(&self, owner: &AccountAddress) -> Result<Vec<ResourceBalance>, QueryError> {
        self.indexer
            .coin_balances(owner)
            .await
            .map_err(|e| QueryError::TransportError(TransportError::BackendError(format!("{e:#}"))))
    }
}

#[async_trait]
impl ActionSubmitter for AptosBlockchainClient {
    async fn submit(
        &self,
        payload: &EntryFunctionPayload,
    ) -> Result<TransactionReceipt, SubmissionError> {
        let signer = self.signer.as_ref().ok_or(SignerError::NotConnected)?;

        let hash = signer.sign_and_submit(payload).await?;
        tracing::info!(function = %payload.function, %hash, "Transaction submitted");

        let tx = self.node.wait_for_transaction(&hash).await?;
        match tx.status() {
            TransactionStatus::Committed { version } => {
                tracing::info!(function = %payload.function, %hash, version, "Transaction committed");
                Ok(TransactionReceipt {
                    hash,
                    function: payload.function,
                    version,
                    gas_used: tx.gas_used(),
                })
            }
            TransactionStatus::Failed { vm_status } => {
                tracing::warn!(function = %payload.function, %hash, %vm_status, "Transaction aborted");
                Err(SubmissionError::ExecutionFailed { hash, vm_status })
            }
            TransactionStatus::Pending => Err(TransportError::Timeout(hash).into()),
        }
    }
}

#[async_trait]
impl BlockchainTransport for AptosBlockchainClient {
    async fn transaction_status(
        &self,
        hash: &TransactionHash,
    ) -> Result<TransactionStatus, TransportError> {
        match self.node.transaction_by_hash(hash).await? {
            Some(tx) => Ok(tx.status()),
            None => Ok(TransactionStatus::Pending),
        }
    }

    async fn wait_for_transaction(
        &self,
        hash: &TransactionHash,
    ) -> Result<TransactionStatus, TransportError> {
        Ok(self.node.wait_for_transaction(hash).await?.status())
    }

    async fn health_check(&self) -> Result<(), TransportError> {
        Ok(self.node.health_check().await?)
    }
}

impl GameBlockchain for AptosBlockchainClient {
    fn name(&self) -> &str {
        "Aptos"
    }

    fn network(&self) -> &str {
        self.config.network.as_str()
    }

    fn player(&self) -> AccountAddress {
        self.player
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AptosNetwork;
    use game_core::EntryFunction;

    fn config() -> AptosConfig {
        AptosConfig::new(AptosNetwork::Local)
            .with_module_address("0xcafe".parse().unwrap())
            .with_player_address("0xa11ce".parse().unwrap())
    }

    #[test]
    fn requires_player_address() {
        let mut config = config();
        config.player_address = None;
        let err = AptosBlockchainClient::new(config).err().unwrap();
        assert!(err.to_string().contains("PVE_PLAYER_ADDRESS"));
    }

    #[test]
    fn reports_network_and_player() {
        let client = AptosBlockchainClient::new(config()).unwrap();
        assert_eq!(client.name(), "Aptos");
        assert_eq!(client.network(), "local");
        assert_eq!(client.player(), "0xa11ce".parse::<AccountAddress>().unwrap());
        assert!(
            client
                .composer()
                .mint_coins()
                .function_id()
                .ends_with("::pve_battles::mint_coins")
        );
    }

    #[tokio::test]
    async fn submit_without_wallet_is_not_connected() {
        let client = AptosBlockchainClient::new(config()).unwrap();
        let payload = client.composer().mint_coins();
        assert_eq!(payload.function, EntryFunction::MintCoins);

        let err = client.submit(&payload).await.unwrap_err();
        assert_eq!(err, SubmissionError::Signer(SignerError::NotConnected));
    }
}
