// src/export/logic.rs

use crate::db::journal::load_records;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::ui::messages::{info, warning};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// High-level export of the local journal.
pub struct ExportLogic;

impl ExportLogic {
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        date: Option<&NaiveDate>,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);

        if path.exists() && !force {
            confirm_replace(path, &mut io::stdin().lock())?;
        }

        let records: Vec<RecordExport> = load_records(&pool.conn, date)?
            .iter()
            .map(RecordExport::from)
            .collect();

        if records.is_empty() {
            warning("No records to export for the selected date.");
        }

        match format {
            ExportFormat::Csv => export_csv(&records, path)?,
            ExportFormat::Json => export_json(&records, path)?,
        }

        if let Err(e) = ttlog(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("Exported {} record(s) to {}", records.len(), path.display()),
        ) {
            warning(format!("Failed to write internal log: {}", e));
        }

        Ok(())
    }
}

/// An existing export file is only replaced when the operator answers yes.
fn confirm_replace(path: &Path, answers: &mut impl BufRead) -> AppResult<()> {
    warning(format!(
        "'{}' already holds an export of the journal.",
        path.display()
    ));
    print!("Replace it? [y/N]: ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    answers.read_line(&mut answer)?;

    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => {
            info("Previous export will be replaced.");
            Ok(())
        }
        _ => Err(AppError::Export(format!(
            "export cancelled, '{}' kept as it was",
            path.display()
        ))),
    }
}
