//! Aptos blockchain configuration.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use client_blockchain_core::BlockchainConfig;
use game_core::{AccountAddress, ModuleId};

use crate::core::error::{AptosError, Result};

/// Module name the game is published under.
pub const DEFAULT_MODULE_NAME: &str = "pve_battles";

const DEFAULT_TX_TIMEOUT_SECS: u64 = 30;

/// Aptos network types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AptosNetwork {
    /// Aptos devnet
    #[default]
    Devnet,
    /// Aptos testnet
    Testnet,
    /// Local node started with `aptos node run-local-testnet`
    Local,
}

impl AptosNetwork {
    pub fn default_node_url(&self) -> &'static str {
        match self {
            AptosNetwork::Devnet => "https://fullnode.devnet.aptoslabs.com/v1",
            AptosNetwork::Testnet => "https://fullnode.testnet.aptoslabs.com/v1",
            AptosNetwork::Local => "http://127.0.0.1:8080/v1",
        }
    }

    pub fn default_indexer_url(&self) -> &'static str {
        match self {
            AptosNetwork::Devnet => "https://api.devnet.aptoslabs.com/v1/graphql",
            AptosNetwork::Testnet => "https://api.testnet.aptoslabs.com/v1/graphql",
            AptosNetwork::Local => "http://127.0.0.1:8090/v1/graphql",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AptosNetwork::Devnet => "devnet",
            AptosNetwork::Testnet => "testnet",
            AptosNetwork::Local => "local",
        }
    }
}

impl FromStr for AptosNetwork {
    type Err = AptosError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "devnet" => Ok(AptosNetwork::Devnet),
            "testnet" => Ok(AptosNetwork::Testnet),
            "local" => Ok(AptosNetwork::Local),
            other => Err(AptosError::InvalidConfig(format!(
                "Invalid APTOS_NETWORK: {other}. Must be devnet, testnet, or local"
            ))),
        }
    }
}

/// Aptos-specific configuration.
#[derive(Debug, Clone)]
pub struct AptosConfig {
    /// Aptos network to connect to
    pub network: AptosNetwork,

    /// Custom fullnode REST URL (overrides network default)
    pub node_url: Option<String>,

    /// Custom indexer GraphQL URL (overrides network default)
    pub indexer_url: Option<String>,

    /// Account the game module is published under
    pub module_address: Option<AccountAddress>,

    pub module_name: String,

    /// Account whose tables and balances are read
    pub player_address: Option<AccountAddress>,

    /// How long to wait for a submitted transaction to finalize
    pub tx_timeout: Duration,
}

impl AptosConfig {
    /// Create a new Aptos configuration.
    pub fn new(network: AptosNetwork) -> Self {
        Self {
            network,
            node_url: None,
            indexer_url: None,
            module_address: None,
            module_name: DEFAULT_MODULE_NAME.to_string(),
            player_address: None,
            tx_timeout: Duration::from_secs(DEFAULT_TX_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `APTOS_NETWORK` - Network name (devnet, testnet, local) (default: devnet)
    /// - `APTOS_NODE_URL` - Custom fullnode REST URL
    /// - `APTOS_INDEXER_URL` - Custom indexer GraphQL URL
    /// - `PVE_MODULE_ADDRESS` - Account the game module is published under
    /// - `PVE_MODULE_NAME` - Module name (default: pve_battles)
    /// - `PVE_PLAYER_ADDRESS` - Player account to read
    /// - `APTOS_TX_TIMEOUT_SECS` - Finality timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self> {
        let network = match env::var("APTOS_NETWORK") {
            Ok(value) => value.parse()?,
            Err(_) => AptosNetwork::default(),
        };

        let mut config = Self::new(network);
        config.node_url = env::var("APTOS_NODE_URL").ok();
        config.indexer_url = env::var("APTOS_INDEXER_URL").ok();
        config.module_address = read_address("PVE_MODULE_ADDRESS")?;
        config.player_address = read_address("PVE_PLAYER_ADDRESS")?;

        if let Ok(name) = env::var("PVE_MODULE_NAME") {
            config.module_name = name;
        }

        if let Some(secs) = env::var("APTOS_TX_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
        {
            config.tx_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Set custom fullnode URL.
    pub fn with_node_url(mut self, url: String) -> Self {
        self.node_url = Some(url);
        self
    }

    /// Set custom indexer URL.
    pub fn with_indexer_url(mut self, url: String) -> Self {
        self.indexer_url = Some(url);
        self
    }

    /// Set the module publisher address.
    pub fn with_module_address(mut self, address: AccountAddress) -> Self {
        self.module_address = Some(address);
        self
    }

    /// Set the player account.
    pub fn with_player_address(mut self, address: AccountAddress) -> Self {
        self.player_address = Some(address);
        self
    }

    /// Set finality timeout.
    pub fn with_tx_timeout(mut self, timeout: Duration) -> Self {
        self.tx_timeout = timeout;
        self
    }

    /// Get the node URL (custom or default for network).
    pub fn get_node_url(&self) -> &str {
        self.node_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_node_url())
    }

    /// Get the indexer URL (custom or default for network).
    pub fn get_indexer_url(&self) -> &str {
        self.indexer_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_indexer_url())
    }

    /// Fully qualified game module.
    pub fn module_id(&self) -> Result<ModuleId> {
        let address = self.module_address.ok_or_else(|| {
            AptosError::InvalidConfig("PVE_MODULE_ADDRESS is required".to_string())
        })?;
        ModuleId::new(address, self.module_name.clone())
            .map_err(|e| AptosError::InvalidConfig(e.to_string()))
    }
}

fn read_address(key: &str) -> Result<Option<AccountAddress>> {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e| AptosError::InvalidConfig(format!("{key}: {e}"))),
        Err(_) => Ok(None),
    }
}

fn check_url(kind: &str, url: &str) -> std::result::Result<(), String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(format!("Invalid {kind} URL format: {url}"));
    }
    Ok(())
}

impl BlockchainConfig for AptosConfig {
    fn network_name(&self) -> &str {
        match self.network {
            AptosNetwork::Devnet => "aptos-devnet",
            AptosNetwork::Testnet => "aptos-testnet",
            AptosNetwork::Local => "aptos-local",
        }
    }

    fn rpc_url(&self) -> &str {
        self.get_node_url()
    }

    fn validate(&self) -> std::result::Result<(), String> {
        check_url("node", self.get_node_url())?;
        check_url("indexer", self.get_indexer_url())?;

        if self.tx_timeout.is_zero() {
            return Err("Transaction timeout must be greater than 0".to_string());
        }

        self.module_id().map_err(|e| e.to_string())?;
        Ok(())
    }
}

impl Default for AptosConfig {
    fn default() -> Self {
        Self::new(AptosNetwork::Devnet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_defaults() {
        assert_eq!("Testnet".parse::<AptosNetwork>().unwrap(), AptosNetwork::Testnet);
        assert!("mainnet".parse::<AptosNetwork>().is_err());

        let config = AptosConfig::default();
        assert_eq!(config.get_node_url(), "https://fullnode.devnet.aptoslabs.com/v1");
        assert_eq!(config.module_name, "pve_battles");
        assert_eq!(config.tx_timeout, Duration::from_secs(30));
    }

    #[test]
    fn overrides_win_over_network_defaults() {
        let config = AptosConfig::new(AptosNetwork::Local)
            .with_node_url("http://node:8080/v1".into())
            .with_indexer_url("http://indexer:8090/v1/graphql".into());
        assert_eq!(config.rpc_url(), "http://node:8080/v1");
        assert_eq!(config.get_indexer_url(), "http://indexer:8090/v1/graphql");
        assert_eq!(config.network_name(), "aptos-local");
    }

    #[test]
    fn validation_requires_module_address() {
        let config = AptosConfig::default();
        assert!(config.validate().unwrap_err().contains("PVE_MODULE_ADDRESS"));

        let config = config.with_module_address("0xcafe".parse().unwrap());
        assert!(config.validate().is_ok());
        assert!(
            config
                .module_id()
                .unwrap()
                .function_id("buy_units")
                .ends_with("::pve_battles::buy_units")
        );
    }

    #[test]
    fn validation_rejects_bad_urls_and_timeouts() {
        let base = AptosConfig::default().with_module_address("0x1".parse().unwrap());

        let bad_url = base.clone().with_node_url("fullnode.devnet".into());
        assert!(bad_url.validate().unwrap_err().contains("node URL"));

        let zero = base.with_tx_timeout(Duration::ZERO);
        assert!(zero.validate().is_err());
    }
}
