//! Remote store seams: catalog reads and record writes.

pub mod http;

use crate::errors::AppResult;
use crate::models::record::PersistedRecord;
use crate::models::work_item::WorkItemRecord;
use crate::models::worker::WorkerRecord;

pub use http::SheetClient;

/// Source of the two reference tables.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    async fn fetch_workers(&self) -> AppResult<Vec<WorkerRecord>>;
    async fn fetch_works(&self) -> AppResult<Vec<WorkItemRecord>>;
}

/// Destination of submitted records. Must fail loudly: a returned `Ok`
/// means the row was written.
#[allow(async_fn_in_trait)]
pub trait RecordSink {
    async fn add_record(&self, record: &PersistedRecord) -> AppResult<()>;
}
