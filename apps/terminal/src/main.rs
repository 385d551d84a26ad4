//! # Tillpoint Terminal
//!
//! Entry point for the `tillpoint` binary.
//!
//! ## Module Organization
//! ```text
//! tillpoint/
//! ├── main.rs     ◄─── You are here (arguments, config, logging)
//! ├── cli.rs      ◄─── clap definitions for process args and shell lines
//! ├── shell.rs    ◄─── Read / execute / print loop over a Session
//! └── render.rs   ◄─── Tables, cart, edit form, notices
//! ```
//!
//! ## Usage
//! ```text
//! tillpoint                               interactive shell
//! tillpoint products --search milk        print one listing and exit
//! tillpoint --base-url http://pos:8080    point at another backend
//! tillpoint config                        show the effective configuration
//! ```

mod cli;
mod render;
mod shell;

use std::io;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tillpoint_client::{ClientConfig, HttpBackend, Session};
use tillpoint_core::{ProductListing, LOAD_FAILED_MESSAGE};

use crate::cli::{Cli, Command};
use crate::shell::Shell;

/// Logs go to stderr so they never interleave with rendered tables.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tillpoint=trace` - Show trace for tillpoint crates only
/// - Default: WARN, INFO for tillpoint crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,tillpoint=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(cli.config.clone()).context("loading configuration")?;
    if let Some(base_url) = &cli.base_url {
        config.backend.base_url = base_url.clone();
        config.validate().context("invalid --base-url")?;
    }
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = load_config(&cli)?;

    match cli.command.unwrap_or(Command::Shell) {
        Command::Config => {
            print!("{}", config.to_toml()?);
        }
        Command::Products { search } => {
            let backend = HttpBackend::new(&config)?;
            let mut session = Session::new(backend, &config);
            let listing = session.list_products(search.as_deref()).await;
            if matches!(listing, ProductListing::Failed) {
                bail!(LOAD_FAILED_MESSAGE);
            }
            println!("{}", render::product_table(&listing));
        }
        Command::Shell => {
            info!(base_url = %config.backend.base_url, "Starting tillpoint shell");
            let backend = HttpBackend::new(&config)?;
            let session = Session::open(backend, &config).await;

            let stdin = io::stdin();
            let mut shell = Shell::new(session, stdin.lock(), io::stdout());
            shell.run().await?;
        }
    }

    Ok(())
}
