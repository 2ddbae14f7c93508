//! Submission controller: validation, record building, single-flight write.

use crate::core::amount::{parse_quantity, round2};
use crate::errors::{AppResult, ValidationError};
use crate::models::draft::EntryDraft;
use crate::models::record::PersistedRecord;
use crate::store::RecordSink;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

/// Guarantees at most one record write at a time.
///
/// Calls made while a write is pending return `Ok(None)` and do nothing.
#[derive(Debug, Default)]
pub struct Submitter {
    submitting: AtomicBool,
}

/// Held for the duration of one write; dropping it returns to `Idle` on
/// every exit path, including errors and a cancelled future.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Submitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmitState {
        if self.submitting.load(Ordering::Acquire) {
            SubmitState::Submitting
        } else {
            SubmitState::Idle
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.state() == SubmitState::Submitting
    }

    /// Validate the draft and write it to the store.
    ///
    /// Returns `Ok(None)` when another submission is already in flight.
    pub async fn submit<S: RecordSink>(
        &self,
        store: &S,
        draft: &EntryDraft,
    ) -> AppResult<Option<PersistedRecord>> {
        if self.is_submitting() {
            tracing::debug!(record_id = %draft.record_id, "submission already in flight, ignoring");
            return Ok(None);
        }

        let record = build_record(draft)?;

        let Some(_in_flight) = InFlight::acquire(&self.submitting) else {
            return Ok(None);
        };

        store.add_record(&record).await?;

        tracing::info!(
            record_id = %record.record_id,
            job_code = %record.job_code,
            amount = record.amount,
            "record submitted"
        );

        Ok(Some(record))
    }
}

/// Check the preconditions in order and build the record to persist.
///
/// The amount is recomputed here from price and quantity rather than taken
/// from the draft.
pub fn build_record(draft: &EntryDraft) -> Result<PersistedRecord, ValidationError> {
    if draft.record_id.is_empty() {
        return Err(ValidationError::MissingRecordId);
    }
    if draft.worker_code.is_empty() {
        return Err(ValidationError::MissingWorker);
    }
    if draft.job_code.is_empty() {
        return Err(ValidationError::MissingJobCode);
    }
    if draft.product.is_empty() {
        return Err(ValidationError::MissingProduct);
    }
    if draft.process.is_empty() {
        return Err(ValidationError::MissingProcess);
    }
    let work_date = draft.work_date.ok_or(ValidationError::MissingWorkDate)?;
    let quantity = parse_quantity(&draft.quantity).ok_or(ValidationError::QuantityNotNumber)?;
    if quantity <= 0.0 {
        return Err(ValidationError::QuantityNotPositive);
    }
    if !draft.unit_price.is_finite() || draft.unit_price <= 0.0 {
        return Err(ValidationError::InvalidUnitPrice);
    }

    Ok(PersistedRecord {
        record_id: draft.record_id.clone(),
        worker_code: draft.worker_code.clone(),
        job_code: draft.job_code.clone(),
        product: draft.product.clone(),
        process: draft.process.clone(),
        work_date,
        quantity,
        unit_price: draft.unit_price,
        amount: round2(draft.unit_price * quantity),
    })
}
