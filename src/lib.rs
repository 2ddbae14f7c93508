//! piecelog library root.
//! Exposes the CLI parser, the high-level run() function, and the entry
//! engine (catalog resolution, amount derivation, submission).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Catalog { .. } => cli::commands::catalog::handle(&cli.command, cfg).await,
        Commands::Add { .. } => cli::commands::add::handle(&cli.command, cfg).await,
        Commands::Session { .. } => cli::commands::session::handle(&cli.command, cfg).await,
        Commands::List { .. } => cli::commands::list::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;

    if let Some(custom_journal) = &cli.journal {
        cfg.journal = custom_journal.clone();
    }

    dispatch(&cli, &cfg).await
}
