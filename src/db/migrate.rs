use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Create the `records` table: one row per record accepted by the store.
fn create_records_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS records (
            record_id     TEXT PRIMARY KEY,
            worker_code   TEXT NOT NULL,
            job_code      TEXT NOT NULL,
            product       TEXT NOT NULL,
            process       TEXT NOT NULL,
            work_date     TEXT NOT NULL,
            quantity      REAL NOT NULL,
            unit_price    REAL NOT NULL,
            amount        REAL NOT NULL,
            registered_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn ensure_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_records_work_date ON records(work_date);
        CREATE INDEX IF NOT EXISTS idx_records_worker ON records(worker_code, work_date);
        "#,
    )?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Called from db::init_db(). Safe to run on every open.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if !table_exists(conn, "records")? {
        create_records_table(conn)?;
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', 'records', 'Created records table')",
            [],
        )?;
        tracing::info!("journal: created records table");
    }

    ensure_indexes(conn)?;
    Ok(())
}
