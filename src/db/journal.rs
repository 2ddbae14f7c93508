//! Local copy of every record the store accepted.

use crate::errors::{AppError, AppResult};
use crate::models::record::PersistedRecord;
use chrono::NaiveDate;
use rusqlite::{Connection, Row, params};

#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub record: PersistedRecord,
    /// Operator-facing timestamp, `YYYY/MM/DD HH:MM:SS`.
    pub registered_at: String,
}

pub fn insert_record(conn: &Connection, record: &PersistedRecord, registered_at: &str) -> AppResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO records
            (record_id, worker_code, job_code, product, process, work_date,
             quantity, unit_price, amount, registered_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.record_id,
            record.worker_code,
            record.job_code,
            record.product,
            record.process,
            record.work_date_str(),
            record.quantity,
            record.unit_price,
            record.amount,
            registered_at,
        ],
    )?;
    Ok(())
}

/// All journalled records, optionally for one work date, oldest first.
pub fn load_records(conn: &Connection, date: Option<&NaiveDate>) -> AppResult<Vec<JournalEntry>> {
    let mut out = Vec::new();

    match date {
        Some(d) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM records WHERE work_date = ?1 ORDER BY registered_at ASC, rowid ASC",
            )?;
            let rows = stmt.query_map([d.format("%Y-%m-%d").to_string()], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT * FROM records ORDER BY work_date ASC, registered_at ASC, rowid ASC")?;
            let rows = stmt.query_map([], map_row)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}

fn map_row(row: &Row) -> rusqlite::Result<JournalEntry> {
    let date_str: String = row.get("work_date")?;
    let work_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    Ok(JournalEntry {
        record: PersistedRecord {
            record_id: row.get("record_id")?,
            worker_code: row.get("worker_code")?,
            job_code: row.get("job_code")?,
            product: row.get("product")?,
            process: row.get("process")?,
            work_date,
            quantity: row.get("quantity")?,
            unit_price: row.get("unit_price")?,
            amount: row.get("amount")?,
        },
        registered_at: row.get("registered_at")?,
    })
}
