use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let pool = DbPool::open_journal(&cfg.journal)?;
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            info("The internal log is empty.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID"),
            Column::new("Date"),
            Column::new("Operation"),
            Column::new("Message"),
        ]);

        for e in entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(e.date);

            let op_target = if e.target.is_empty() {
                e.operation
            } else {
                format!("{} ({})", e.operation, e.target)
            };

            table.add_row(vec![e.id.to_string(), date, op_target, e.message]);
        }

        print!("{}", table.render());
    }

    Ok(())
}
