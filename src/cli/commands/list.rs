use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::journal::load_records;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::utils::date::parse_date;
use crate::utils::formatting::money;
use crate::utils::table::{Column, Table};

/// List journalled submissions.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { date } = cmd {
        let date = match date {
            Some(d) => Some(parse_date(d).ok_or_else(|| AppError::InvalidDate(d.clone()))?),
            None => None,
        };

        let pool = DbPool::open_journal(&cfg.journal)?;
        let entries = load_records(&pool.conn, date.as_ref())?;

        if entries.is_empty() {
            info("No records in the journal.");
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("Work date"),
            Column::new("Worker"),
            Column::new("Job"),
            Column::new("Product"),
            Column::new("Process"),
            Column::new("Qty"),
            Column::new("Price"),
            Column::new("Amount"),
            Column::new("Registered"),
        ]);

        let mut total = 0.0;
        for e in &entries {
            let r = &e.record;
            total += r.amount;
            table.add_row(vec![
                r.work_date_str(),
                r.worker_code.clone(),
                r.job_code.clone(),
                r.product.clone(),
                r.process.clone(),
                r.quantity.to_string(),
                money(r.unit_price),
                money(r.amount),
                e.registered_at.clone(),
            ]);
        }

        print!("{}", table.render());
        println!();
        info(format!(
            "{} record(s), total amount {}",
            entries.len(),
            money(crate::core::amount::round2(total))
        ));
    }

    Ok(())
}
