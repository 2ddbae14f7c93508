use chrono::NaiveDate;
use uuid::Uuid;

/// The entry being edited. Owned by one `Session` and mutated only through it.
///
/// `unit_price` and `amount` are derived and are never set from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDraft {
    pub record_id: String,
    pub worker_code: String,
    pub job_code: String,
    pub product: String,
    pub process: String,
    pub part_no: String,
    pub work_date: Option<NaiveDate>,
    /// Free text as typed; parsed on every recompute.
    pub quantity: String,
    pub unit_price: f64,
    pub amount: f64,
}

impl EntryDraft {
    pub fn new(work_date: NaiveDate) -> Self {
        Self {
            record_id: Uuid::new_v4().to_string(),
            worker_code: String::new(),
            job_code: String::new(),
            product: String::new(),
            process: String::new(),
            part_no: String::new(),
            work_date: Some(work_date),
            quantity: String::new(),
            unit_price: 0.0,
            amount: 0.0,
        }
    }

    /// Start the next entry: fresh record id, job fields cleared,
    /// worker and work date carried forward.
    pub fn next_entry(&self) -> Self {
        Self {
            record_id: Uuid::new_v4().to_string(),
            worker_code: self.worker_code.clone(),
            work_date: self.work_date,
            job_code: String::new(),
            product: String::new(),
            process: String::new(),
            part_no: String::new(),
            quantity: String::new(),
            unit_price: 0.0,
            amount: 0.0,
        }
    }

    /// Product, process and part follow the job code while one is present.
    pub fn is_code_locked(&self) -> bool {
        !self.job_code.is_empty()
    }

    pub fn work_date_str(&self) -> String {
        self.work_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}
