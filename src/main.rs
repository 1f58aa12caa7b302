//! # Market Map CLI (`market-map`)
//!
//! Runs the catalog API and checks remote datastore connectivity.
//!
//! ## Usage
//!
//! ```bash
//! market-map --config ./config/market-map.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `market-map serve` | Start the HTTP catalog API |
//! | `market-map check` | Verify remote datastore connectivity |
//!
//! Remote datastore access is configured through the `SUPABASE_URL` and
//! `SUPABASE_KEY` environment variables. When either is absent the
//! service runs entirely on the built-in static dataset.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use market_map::config::{self, DatastoreConfig};
use market_map::remote::{RemoteCatalog, RemoteSource};
use market_map::server;
use market_map::service::CatalogService;

/// Market Map — a read-only catalog API for crypto market sectors,
/// companies, and research notes.
#[derive(Parser)]
#[command(
    name = "market-map",
    about = "Market Map — read-only catalog API for crypto market sectors and companies",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Controls the bind address and allowed CORS origins. A missing
    /// file is fine; defaults are used.
    #[arg(long, global = true, default_value = "./config/market-map.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP catalog API.
    ///
    /// Serves `/`, `/sectors`, `/sectors/{slug}`, `/companies/{slug}`,
    /// and `/companies/{slug}/research`. Uses the remote datastore when
    /// configured, the built-in dataset otherwise.
    Serve,

    /// Check remote datastore connectivity.
    ///
    /// Runs one live sectors query against the configured datastore and
    /// reports what it found. Useful for verifying credentials before
    /// deploying.
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            let remote = connect_remote()?;
            let service = Arc::new(CatalogService::new(remote));
            server::run_server(&config, service).await?;
        }
        Commands::Check => {
            check_datastore().await?;
        }
    }

    Ok(())
}

/// Builds the remote datastore client from the environment, logging the
/// mode decision once. A missing configuration is a permanent mode
/// selection for the process lifetime, not an error.
fn connect_remote() -> Result<Option<Box<dyn RemoteSource>>> {
    match DatastoreConfig::from_env() {
        Some(datastore) => {
            println!("Remote datastore configured at {}", datastore.url);
            Ok(Some(Box::new(RemoteCatalog::new(&datastore)?)))
        }
        None => {
            println!(
                "Remote datastore not configured ({} / {} unset); serving the built-in dataset",
                DatastoreConfig::URL_VAR,
                DatastoreConfig::KEY_VAR
            );
            Ok(None)
        }
    }
}

async fn check_datastore() -> Result<()> {
    let datastore = match DatastoreConfig::from_env() {
        Some(datastore) => datastore,
        None => {
            println!(
                "NOT CONFIGURED: set {} and {} to enable the remote datastore",
                DatastoreConfig::URL_VAR,
                DatastoreConfig::KEY_VAR
            );
            return Ok(());
        }
    };

    println!("Checking datastore at {} ...", datastore.url);
    let remote = RemoteCatalog::new(&datastore)?;

    match remote.sectors().await {
        Ok(sectors) => {
            let companies: usize = sectors.iter().map(|s| s.company_count).sum();
            println!("OK: {} sectors, {} companies", sectors.len(), companies);
        }
        Err(err) => {
            eprintln!("FAILED: {:#}", err);
            std::process::exit(1);
        }
    }

    Ok(())
}
