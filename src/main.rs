//! Command-line front end for the carbon credit exchange client.
//!
//! Every command prints a single JSON outcome document on stdout; logs go to
//! stderr.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::Serialize;

use carbon_exchange::blockchain::TransactionOutcome;
use carbon_exchange::config::{load_config, ExchangeConfig};
use carbon_exchange::observability::logging::init_logging;
use carbon_exchange::redemption::Catalogue;
use carbon_exchange::report::{report, report_error, Outcome};
use carbon_exchange::ExchangeClient;

#[derive(Parser)]
#[command(name = "carbon-exchange")]
#[command(about = "Buy and redeem tokenized carbon credits through a wallet", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wallet JSON-RPC endpoint, overriding the configuration.
    #[arg(short, long)]
    wallet: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check which network the wallet is on
    Status,
    /// Read price, supply and credits per tonne with derived footprint
    Pricing,
    /// Read the current credit price
    Price,
    /// Read carbon credits per tonne
    PerTon,
    /// Compute the carbon footprint figure
    Footprint,
    /// Purchase carbon credits
    Purchase {
        /// Whole tonnes to buy
        tonnes: String,
    },
    /// Redeem a carbon token through the redemption SDK
    Redeem {
        /// Token symbol or id
        token: String,
        /// Decimal amount to redeem
        amount: String,
        /// Indexer catalogue (JSON) the token must appear in
        #[arg(long)]
        catalogue: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => return print_outcome(&report_error::<()>("load_config", &e)),
        },
        None => ExchangeConfig::default(),
    };
    init_logging(&config.observability);

    let config = apply_overrides(config, &cli);
    let client = match ExchangeClient::from_config(config) {
        Ok(client) => client,
        Err(e) => return print_outcome(&report::<()>("connect", Err(e))),
    };

    tracing::info!(client = ?client, "carbon-exchange v0.1.0 starting");

    match cli.command {
        Commands::Status => print_outcome(&report("network_status", client.network_status().await)),
        Commands::Pricing => {
            print_outcome(&report("pricing_snapshot", client.pricing_snapshot().await))
        }
        Commands::Price => print_outcome(&report("credit_price", client.credit_price().await)),
        Commands::PerTon => print_outcome(&report(
            "carbon_credits_per_ton",
            client.carbon_credits_per_ton().await,
        )),
        Commands::Footprint => {
            print_outcome(&report("carbon_footprint", client.carbon_footprint().await))
        }
        Commands::Purchase { tonnes } => {
            let result = client.purchase_input(&tonnes).await;
            if let Ok(receipt) = &result {
                log_explorer_link(&client, &receipt.outcome);
            }
            print_outcome(&report("purchase", result))
        }
        Commands::Redeem {
            token,
            amount,
            catalogue,
        } => {
            let client = match catalogue {
                Some(path) => match load_catalogue(&path) {
                    Ok(catalogue) => client.with_catalogue(catalogue),
                    Err(e) => return print_outcome(&report_error::<()>("load_catalogue", e.as_ref())),
                },
                None => client,
            };
            let result = client.redeem(&token, &amount).await;
            if let Ok(receipt) = &result {
                log_explorer_link(&client, &receipt.outcome);
            }
            print_outcome(&report("redeem", result))
        }
    }
}

fn apply_overrides(mut config: ExchangeConfig, cli: &Cli) -> ExchangeConfig {
    if let Some(wallet) = &cli.wallet {
        config.network.wallet_rpc_url = Some(wallet.clone());
    }
    config
}

fn log_explorer_link(client: &ExchangeClient, outcome: &TransactionOutcome) {
    tracing::info!(
        url = %outcome.explorer_url(&client.config().network.explorer_url),
        "View transaction"
    );
}

fn load_catalogue(path: &Path) -> Result<Catalogue, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(Catalogue::from_json(&content)?)
}

fn print_outcome<T: Serialize>(outcome: &Outcome<T>) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(())
}
