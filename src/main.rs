//! # repofeed CLI (`rfeed`)
//!
//! The `rfeed` binary feeds a local source tree into a persistent chat
//! context and relays prompts to an OpenAI-compatible model through it.
//!
//! ## Usage
//!
//! ```bash
//! rfeed --config ./config/repofeed.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rfeed init` | Write an example configuration file |
//! | `rfeed scan` | Preview what a feed would send, without contacting the model |
//! | `rfeed chat` | Feed the repository, then start the interactive chat loop |
//!
//! ## Examples
//!
//! ```bash
//! # Scaffold a config, then point it at your project
//! rfeed init
//!
//! # See which files match and how many chunks they produce
//! rfeed scan --config ./config/repofeed.toml
//!
//! # Chat over the repo; inside the loop, `REFEED_REPO` reloads modified
//! # files and `exit` quits
//! OPENAI_API_KEY=sk-... rfeed chat --config ./config/repofeed.toml
//! ```

mod chat;
mod chunk;
mod client;
mod config;
mod feed;
mod fingerprint;
mod models;
mod scanner;
mod session;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// repofeed CLI — feed a source tree into a persistent chat context for
/// LLM-assisted code review.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. See `config/repofeed.example.toml` for a full example.
#[derive(Parser)]
#[command(
    name = "rfeed",
    about = "repofeed — feed a source tree into a persistent chat context for LLM-assisted code review",
    version,
    long_about = "repofeed scans a repository, detects changed files via content fingerprints, \
    splits or summarizes their text, and injects the result into an in-memory conversation \
    that an interactive chat loop relays to an OpenAI-compatible model on every turn."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/repofeed.toml`. All repository, chunking,
    /// model, and retention settings are read from this file.
    #[arg(long, global = true, default_value = "./config/repofeed.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Write an example configuration file.
    ///
    /// Creates the file at the `--config` path with commented defaults.
    /// Refuses to overwrite an existing file.
    Init,

    /// Preview what a feed would send, without contacting the model.
    ///
    /// Lists matched files with their fingerprints, raw chunk counts, and
    /// how many files would be summarized. Runs entirely offline.
    Scan,

    /// Feed the repository, then start the interactive chat loop.
    ///
    /// Requires the API credential named by `model.api_key_env` in the
    /// environment. Inside the loop, `REFEED_REPO` reloads modified files
    /// and `exit` quits.
    Chat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Init doesn't require an existing config
    if let Commands::Init = cli.command {
        config::scaffold_config(&cli.config)?;
        println!("Wrote example config to {}", cli.config.display());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Scan => {
            feed::run_scan(&cfg)?;
        }
        Commands::Chat => {
            let client = client::ModelClient::new(&cfg.model)?;
            let mut session = session::Session::new();
            let report = feed::run_feed(&cfg, &client, &mut session).await?;
            feed::print_report(&report);
            chat::run_chat(&cfg, &client, &mut session).await?;
        }
        Commands::Init => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
