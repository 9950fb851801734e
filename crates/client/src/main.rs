//! PvE battles client binary.
//!
//! Read-only command line client: lists the game tables and the player's
//! balances, and prints the entry-function payloads an attack or purchase
//! would submit. Signing stays with the player's wallet.
//!
//! # Examples
//!
//! ```bash
//! # List enemy levels on devnet
//! PVE_MODULE_ADDRESS=0xcafe PVE_PLAYER_ADDRESS=0xa11ce pve levels
//!
//! # Payload for attacking level 2 with 3 of unit 1 and 1 of unit 4
//! pve attack --level 2 --unit 1=3 --unit 4=1
//! ```

mod commands;
mod dirs;
mod logging;

use anyhow::Result;
use clap::Parser;
use client_frontend_core::RefreshScope;
use commands::{Attack, Buy, GlobalArgs, List, ListKind, Mint};

/// PvE battles client
#[derive(Parser)]
#[command(name = "pve")]
#[command(about = "Inspect the PvE battles game and compose its transactions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List unit definitions
    Units,

    /// List purchase contracts
    Contracts,

    /// List enemy levels
    Levels,

    /// List the player's non-zero balances
    Balances,

    /// Print the attack payload for a level and committed units
    Attack(Attack),

    /// Print the purchase payload for a contract
    Buy(Buy),

    /// Print the starter-resources payload
    Mint(Mint),
}

impl Command {
    /// Lists the command reads.
    fn scope(&self) -> RefreshScope {
        match self {
            Command::Units => ListKind::Units.scope(),
            Command::Contracts => ListKind::Contracts.scope(),
            Command::Levels => ListKind::Levels.scope(),
            Command::Balances => ListKind::Balances.scope(),
            Command::Attack(_) => Attack::SCOPE,
            Command::Buy(_) => Buy::SCOPE,
            Command::Mint(_) => Mint::SCOPE,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _log_guard = logging::setup_logging()?;

    let controller = cli.global.connect(cli.command.scope()).await?;

    match cli.command {
        Command::Units => List::new(ListKind::Units).execute(&controller),
        Command::Contracts => List::new(ListKind::Contracts).execute(&controller),
        Command::Levels => List::new(ListKind::Levels).execute(&controller),
        Command::Balances => List::new(ListKind::Balances).execute(&controller),
        Command::Attack(cmd) => cmd.execute(&controller),
        Command::Buy(cmd) => cmd.execute(&controller),
        Command::Mint(cmd) => cmd.execute(&controller),
    }
}
