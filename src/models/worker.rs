use serde::{Deserialize, Serialize};

/// One row of the worker sheet. Reference data, never edited locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerRecord {
    #[serde(deserialize_with = "crate::models::work_item::de_text")]
    pub worker_code: String,
    #[serde(default, deserialize_with = "crate::models::work_item::de_text")]
    pub worker_name: String,
}

impl WorkerRecord {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            worker_code: code.to_string(),
            worker_name: name.to_string(),
        }
    }

    /// "<code> <name>", as shown in pickers and confirmations.
    pub fn label(&self) -> String {
        if self.worker_name.is_empty() {
            self.worker_code.clone()
        } else {
            format!("{} {}", self.worker_code, self.worker_name)
        }
    }
}
