//! Bookstore CLI - Render and replay the bookstore page.
//!
//! # Usage
//!
//! ```bash
//! # Render the initial page for a store
//! bookstore render --data store.json
//!
//! # Render in euros, without the sample draft, into a file
//! bookstore render --data store.json --currency EUR --no-prefill --out page.html
//!
//! # Replay scripted interactions and print the resulting page
//! bookstore replay --data store.json --script session.yaml
//! ```
//!
//! # Commands
//!
//! - `render` - Populate the page from store data and print its HTML
//! - `replay` - Populate, apply a YAML list of interactions, print the HTML
//!
//! `--data` falls back to `BOOKSTORE_DATA_PATH`; see
//! `bookstore_storefront::config` for the other variables. Logs go to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use bookstore_core::CurrencyCode;
use bookstore_storefront::config::StorefrontConfig;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "bookstore")]
#[command(author, version, about = "Bookstore page tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the populated page as HTML
    Render {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Apply scripted interactions, then render the page
    Replay {
        /// YAML file with a list of interactions
        #[arg(short, long)]
        script: PathBuf,

        #[command(flatten)]
        page: PageArgs,
    },
}

/// Options shared by every command that builds the page.
#[derive(Args, Debug, Clone)]
struct PageArgs {
    /// Store JSON file (defaults to `BOOKSTORE_DATA_PATH`)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Currency code for prices (`USD`, `EUR`, `GBP`, `CAD`, `AUD`)
    #[arg(short, long)]
    currency: Option<CurrencyCode>,

    /// Leave the book form empty instead of filling in the sample book
    #[arg(long)]
    no_prefill: bool,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
}

impl PageArgs {
    /// Layer command-line flags over the environment configuration.
    fn apply_to(&self, mut config: StorefrontConfig) -> StorefrontConfig {
        if let Some(data) = &self.data {
            config.data_path = Some(data.clone());
        }
        if let Some(currency) = self.currency {
            config.currency = currency;
        }
        if self.no_prefill {
            config.prefill_form = false;
        }
        config
    }
}

fn main() {
    // Logs go to stderr so stdout carries only HTML
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "bookstore_storefront=info,bookstore_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let env_config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Render { page } => {
            let config = page.apply_to(env_config);
            commands::render::run(&config, page.out.as_deref())?;
        }
        Commands::Replay { script, page } => {
            let config = page.apply_to(env_config);
            commands::replay::run(&config, &script, page.out.as_deref())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "bookstore",
            "render",
            "--data",
            "store.json",
            "--currency",
            "gbp",
            "--no-prefill",
        ]);
        let Commands::Render { page } = cli.command else {
            panic!("expected render");
        };

        let config = page.apply_to(StorefrontConfig::default());
        assert_eq!(config.data_path, Some(PathBuf::from("store.json")));
        assert_eq!(config.currency, CurrencyCode::GBP);
        assert!(!config.prefill_form);
    }

    #[test]
    fn test_missing_flags_keep_config() {
        let cli = Cli::parse_from(["bookstore", "replay", "--script", "s.yaml"]);
        let Commands::Replay { script, page } = cli.command else {
            panic!("expected replay");
        };

        assert_eq!(script, PathBuf::from("s.yaml"));
        let config = page.apply_to(StorefrontConfig::default());
        assert_eq!(config, StorefrontConfig::default());
    }
}
