use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One priced unit of piecework from the work sheet.
///
/// `part_no` may be empty: an empty part number is a real, distinct value
/// meaning "no specific part".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkItemRecord {
    #[serde(deserialize_with = "de_text")]
    pub job_code: String,
    #[serde(default, deserialize_with = "de_text")]
    pub product: String,
    #[serde(default, deserialize_with = "de_text")]
    pub process: String,
    #[serde(default, deserialize_with = "de_text")]
    pub part_no: String,
    #[serde(default, deserialize_with = "de_price")]
    pub unit_price: f64,
}

impl WorkItemRecord {
    pub fn new(job_code: &str, product: &str, process: &str, part_no: &str, unit_price: f64) -> Self {
        Self {
            job_code: job_code.to_string(),
            product: product.to_string(),
            process: process.to_string(),
            part_no: part_no.to_string(),
            unit_price,
        }
    }

    pub fn matches(&self, product: &str, process: &str) -> bool {
        self.product == product && self.process == process
    }
}

/// Spreadsheet cells arrive as strings, numbers or null depending on how the
/// sheet was typed. Everything is read as text; null becomes "".
pub(crate) fn de_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    })
}

/// Price cells: number, numeric string, or blank. Blank and unreadable
/// values become 0, which later fails the unit-price check at submission.
fn de_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if price.is_finite() { price } else { 0.0 })
}
