//! Wallet bridge CLI.
//!
//! Drives the trigger surface from a terminal: either a line-oriented loop on
//! stdin or a single command. Host writes go to an in-memory host and are
//! printed as they happen.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use wallet_bridge::chain::Amount;
use wallet_bridge::commands::{Command, CommandArgs, CommandOutcome, WalletBridge};
use wallet_bridge::config::load_config;
use wallet_bridge::host::{GameState, WalletUi};
use wallet_bridge::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "wallet-bridge")]
#[command(about = "Wallet connection, balance gating and transfers for game events", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read triggers from stdin, one per line: `CommandName key=value ...`
    Run {
        #[arg(short, long, default_value = "wallet-bridge.toml")]
        config: PathBuf,
    },
    /// Run a single trigger, connecting first when it needs a wallet
    Exec {
        #[arg(short, long, default_value = "wallet-bridge.toml")]
        config: PathBuf,
        /// Trigger name, e.g. ShowTokenBalance
        name: String,
        /// Arguments as key=value
        args: Vec<String>,
    },
    /// Validate a configuration file and exit
    CheckConfig {
        #[arg(short, long, default_value = "wallet-bridge.toml")]
        config: PathBuf,
    },
}

/// Prints host writes to the terminal.
struct ConsoleHost;

impl WalletUi for ConsoleHost {
    fn set_wallet_label(&self, label: &str) {
        println!("[button] {}", label);
    }

    fn alert(&self, message: &str) {
        println!("[alert] {}", message);
    }
}

impl GameState for ConsoleHost {
    fn set_variable(&self, id: u32, value: Amount) {
        println!("[variable {}] {}", id, value);
    }

    fn add_message(&self, message: String) {
        println!("[message] {}", message);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::CheckConfig { config } => {
            let config = load_config(&config)?;
            println!(
                "Configuration OK: chain {} via {}",
                config.network.chain_id, config.network.rpc_url
            );
        }
        Commands::Run { config } => {
            let bridge = start(&config).await?;
            run_loop(&bridge).await?;
        }
        Commands::Exec { config, name, args } => {
            let bridge = start(&config).await?;
            let args = CommandArgs::from_pairs(args.iter().map(String::as_str))?;
            let command = Command::decode(&name, &args)?;
            if command.needs_session() {
                bridge.execute("ConnectWallet", &CommandArgs::new()).await?;
            }
            let outcome = bridge.execute(&name, &args).await?;
            report(&outcome);
        }
    }

    Ok(())
}

/// Load config, set up observability and build the bridge.
async fn start(
    path: &std::path::Path,
) -> Result<Arc<WalletBridge>, Box<dyn std::error::Error>> {
    let config = load_config(path)?;
    logging::init(&config.observability.log_level);

    tracing::info!("wallet-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let host = Arc::new(ConsoleHost);
    let bridge = WalletBridge::new(&config, host.clone(), host)?;

    // A mismatch only warns; triggers can still override the network.
    if let Err(e) = bridge.resolver().default_client().verify_chain_id().await {
        tracing::warn!(error = %e, "Default network check failed");
    }

    Ok(Arc::new(bridge))
}

/// One task per line so a slow RPC never blocks later triggers.
async fn run_loop(bridge: &Arc<WalletBridge>) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut tasks = tokio::task::JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else {
            continue;
        };
        let args = match CommandArgs::from_pairs(tokens) {
            Ok(args) => args,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let bridge = bridge.clone();
        let name = name.to_string();
        tasks.spawn(async move {
            match bridge.execute(&name, &args).await {
                Ok(outcome) => report(&outcome),
                Err(e) => eprintln!("{}: {}", name, e),
            }
        });
    }

    while tasks.join_next().await.is_some() {}
    tracing::info!("Input closed, shutdown complete");
    Ok(())
}

fn report(outcome: &CommandOutcome) {
    match serde_json::to_string(outcome) {
        Ok(line) => println!("{}", line),
        Err(e) => tracing::error!(error = %e, "Failed to encode outcome"),
    }
}
