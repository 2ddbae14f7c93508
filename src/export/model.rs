use crate::db::journal::JournalEntry;
use serde::Serialize;

/// Flat, export-friendly view of a journalled record.
#[derive(Debug, Clone, Serialize)]
pub struct RecordExport {
    pub record_id: String,
    pub worker_code: String,
    pub job_code: String,
    pub product: String,
    pub process: String,
    pub work_date: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub amount: f64,
    pub registered_at: String,
}

impl From<&JournalEntry> for RecordExport {
    fn from(e: &JournalEntry) -> Self {
        let r = &e.record;
        Self {
            record_id: r.record_id.clone(),
            worker_code: r.worker_code.clone(),
            job_code: r.job_code.clone(),
            product: r.product.clone(),
            process: r.process.clone(),
            work_date: r.work_date_str(),
            quantity: r.quantity,
            unit_price: r.unit_price,
            amount: r.amount,
            registered_at: e.registered_at.clone(),
        }
    }
}
