use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The row written to the remote store, once per successful submission.
///
/// Keys are the spreadsheet's column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    #[serde(rename = "実績ID")]
    pub record_id: String,
    #[serde(rename = "内職者コード")]
    pub worker_code: String,
    #[serde(rename = "内職コード")]
    pub job_code: String,
    #[serde(rename = "商品")]
    pub product: String,
    #[serde(rename = "工程")]
    pub process: String,
    #[serde(rename = "作業日")]
    pub work_date: NaiveDate,
    #[serde(rename = "数量")]
    pub quantity: f64,
    #[serde(rename = "単価")]
    pub unit_price: f64,
    #[serde(rename = "金額")]
    pub amount: f64,
}

impl PersistedRecord {
    pub fn work_date_str(&self) -> String {
        self.work_date.format("%Y-%m-%d").to_string()
    }

    /// Confirmation shown after the store accepted the record.
    pub fn confirmation(&self) -> String {
        format!(
            "Registered.\n{} / {} / {} / qty: {}",
            self.work_date_str(),
            self.product,
            self.process,
            self.quantity
        )
    }
}

