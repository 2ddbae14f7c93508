//! Entry session: owns the draft and drives resolution, derivation and
//! submission from discrete input events.

use crate::core::amount::derive_amount;
use crate::core::catalog::Catalog;
use crate::core::resolve::{self, Settled};
use crate::core::submit::Submitter;
use crate::errors::{AppError, AppResult};
use crate::models::draft::EntryDraft;
use crate::models::record::PersistedRecord;
use crate::store::RecordSink;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Worker(String),
    JobCode(String),
    /// Text from a scanner; handled exactly like a typed job code.
    Scanned(String),
    ClearJobCode,
    Product(String),
    Process(String),
    PartNo(String),
    WorkDate(Option<NaiveDate>),
    Quantity(String),
    /// Abandon the current entry and start the next one.
    Reset,
}

pub struct Session {
    catalog: Catalog,
    draft: EntryDraft,
    submitter: Submitter,
    error: Option<String>,
    notice: Option<String>,
}

impl Session {
    pub fn new(catalog: Catalog, today: NaiveDate) -> Self {
        Self {
            catalog,
            draft: EntryDraft::new(today),
            submitter: Submitter::new(),
            error: None,
            notice: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn draft(&self) -> &EntryDraft {
        &self.draft
    }

    pub fn submitter(&self) -> &Submitter {
        &self.submitter
    }

    /// The one message currently shown to the user. Latest wins.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Apply one input and recompute the derived fields.
    pub fn apply(&mut self, input: Input) -> AppResult<()> {
        if let Err(e) = self.edit(input) {
            self.error = Some(e.to_string());
            return Err(e);
        }
        self.recompute()
    }

    fn edit(&mut self, input: Input) -> AppResult<()> {
        let d = &mut self.draft;
        match input {
            Input::Worker(code) => d.worker_code = code.trim().to_string(),
            Input::JobCode(code) | Input::Scanned(code) => d.job_code = code.trim().to_string(),
            Input::ClearJobCode => d.job_code.clear(),
            Input::Product(p) => {
                ensure_unlocked(d, "product")?;
                d.product = p;
            }
            Input::Process(p) => {
                ensure_unlocked(d, "process")?;
                d.process = p;
            }
            Input::PartNo(p) => {
                ensure_unlocked(d, "part number")?;
                d.part_no = p;
            }
            Input::WorkDate(date) => d.work_date = date,
            Input::Quantity(q) => d.quantity = q,
            Input::Reset => *d = d.next_entry(),
        }
        Ok(())
    }

    fn recompute(&mut self) -> AppResult<()> {
        let settled = resolve::settle(&self.catalog, &mut self.draft);
        self.draft.amount = derive_amount(self.draft.unit_price, &self.draft.quantity);

        match settled {
            Ok(Settled::Resolved) => {
                self.error = None;
                Ok(())
            }
            Ok(Settled::Unresolved) => Ok(()),
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Submit the current draft.
    ///
    /// On success the confirmation becomes the notice and the next entry
    /// begins; on failure the draft is kept for a manual retry. `Ok(None)`
    /// means a submission was already in flight.
    pub async fn submit<S: RecordSink>(
        &mut self,
        store: &S,
    ) -> AppResult<Option<PersistedRecord>> {
        if self.submitter.is_submitting() {
            return Ok(None);
        }
        self.error = None;

        match self.submitter.submit(store, &self.draft).await {
            Ok(Some(record)) => {
                self.notice = Some(record.confirmation());
                self.draft = self.draft.next_entry();
                Ok(Some(record))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

fn ensure_unlocked(draft: &EntryDraft, field: &'static str) -> AppResult<()> {
    if draft.is_code_locked() {
        return Err(AppError::FieldLocked(field));
    }
    Ok(())
}
