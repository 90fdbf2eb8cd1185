//! Café Artesano CLI - Catalog and newsletter tools.
//!
//! # Usage
//!
//! ```bash
//! # Query the catalog the way the storefront does
//! ca-cli catalog --search chocolate --roast medium --sort rating
//!
//! # Show newsletter subscribers
//! ca-cli subscribers list
//!
//! # Add a subscriber
//! ca-cli subscribers add ana@example.com --data-dir ./data
//! ```
//!
//! # Commands
//!
//! - `catalog` - Search, filter, and sort the product catalog
//! - `subscribers list` - Print the newsletter list
//! - `subscribers add` - Add an address to the newsletter list

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "ca-cli")]
#[command(author, version, about = "Café Artesano CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the product catalog
    Catalog {
        /// Case-insensitive text matched against name, origin, and tasting notes
        #[arg(short, long)]
        search: Option<String>,

        /// Roast filter (`all`, `light`, `medium`, `dark`)
        #[arg(short, long)]
        roast: Option<String>,

        /// Sort order (`name`, `price-low`, `price-high`, `rating`)
        #[arg(long)]
        sort: Option<String>,
    },
    /// Manage the newsletter subscriber list
    Subscribers {
        /// Directory holding the list files (defaults to `STOREFRONT_DATA_DIR`)
        #[arg(long, global = true)]
        data_dir: Option<PathBuf>,

        #[command(subcommand)]
        action: SubscriberAction,
    },
}

#[derive(Subcommand)]
enum SubscriberAction {
    /// Print every subscriber
    List,
    /// Add a subscriber
    Add {
        /// Email address
        email: String,
    },
}

fn main() {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cafe_artesano_cli=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = run(cli, &mut out).and_then(|()| out.flush().map_err(CliError::from));

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli, out: &mut impl Write) -> Result<(), CliError> {
    match cli.command {
        Commands::Catalog { search, roast, sort } => {
            commands::catalog::list(out, search.as_deref(), roast.as_deref(), sort.as_deref())?;
        }
        Commands::Subscribers { data_dir, action } => {
            let store = commands::subscribers::open_store(data_dir)?;
            match action {
                SubscriberAction::List => {
                    commands::subscribers::list(out, &store)?;
                }
                SubscriberAction::Add { email } => {
                    commands::subscribers::add(out, &store, &email)?;
                }
            }
        }
    }
    Ok(())
}
