use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (unless running in test mode)
///  - the local journal and its schema
pub fn handle(cli: &Cli) -> AppResult<()> {
    let journal_path = Config::init_all(cli.journal.clone(), cli.test)?;
    let journal = journal_path.to_string_lossy().to_string();

    info("Initializing piecelog…");
    if !cli.test {
        info(format!("Config file : {}", Config::config_file().display()));
    }
    info(format!("Journal     : {}", journal));

    let pool = DbPool::open_journal(&journal)?;

    success(format!("Journal initialized at {}", journal));

    if let Err(e) = log::ttlog(
        &pool.conn,
        "init",
        "journal",
        &format!("Journal initialized at {}", journal),
    ) {
        warning(format!("Failed to write internal log: {}", e));
    }

    let cfg = Config::load()?;
    if cfg.store_url.is_empty() {
        warning("store_url is not set yet: run `piecelog config --edit` before adding entries.");
    }

    Ok(())
}
