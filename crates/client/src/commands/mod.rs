//! Subcommand implementations.

mod catalog;
mod plan;

pub use catalog::{List, ListKind};
pub use plan::{Attack, Buy, Mint};

use anyhow::Result;
use clap::Args;
use client_blockchain_aptos::{AptosBlockchainClient, AptosConfig};
use client_frontend_core::{FrontendConfig, PvEController, RefreshScope};
use game_core::{AccountAddress, EntryFunctionPayload};

pub type Controller = PvEController<AptosBlockchainClient>;

/// Options shared by every subcommand; environment variables supply the rest.
#[derive(Args)]
pub struct GlobalArgs {
    /// Player account to read (overrides PVE_PLAYER_ADDRESS)
    #[arg(long, global = true, value_name = "ADDRESS")]
    player: Option<AccountAddress>,

    /// Fullnode REST URL (overrides APTOS_NODE_URL)
    #[arg(long, global = true, value_name = "URL")]
    node_url: Option<String>,
}

impl GlobalArgs {
    /// Build the Aptos client and load the lists in `scope`.
    pub async fn connect(&self, scope: RefreshScope) -> Result<Controller> {
        let mut config = AptosConfig::from_env()?;
        if let Some(player) = self.player {
            config = config.with_player_address(player);
        }
        if let Some(url) = &self.node_url {
            config = config.with_node_url(url.clone());
        }

        let client = AptosBlockchainClient::new(config)?;
        let composer = client.composer();
        let controller = PvEController::new(client, composer, &FrontendConfig::from_env());

        controller.refresh(scope).await;
        Ok(controller)
    }
}

fn print_payload(payload: &EntryFunctionPayload) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(payload)?);
    Ok(())
}
