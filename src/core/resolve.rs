//! Job code ↔ (product, process, part) resolution against the work catalog.
//!
//! Exactly one direction runs per pass:
//! - a non-empty job code is authoritative and fills product, process, part
//!   and unit price (code → fields);
//! - otherwise, once product and process are both set, the catalog is
//!   searched for a matching row and its job code and price are adopted
//!   (fields → code).

use crate::core::catalog::Catalog;
use crate::errors::{AppError, AppResult};
use crate::models::draft::EntryDraft;
use crate::models::work_item::WorkItemRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    /// The job code names this row.
    Code(&'a WorkItemRecord),
    /// The job code is not in the catalog.
    CodeNotFound,
    /// Product/process/part picked this row.
    Fields(&'a WorkItemRecord),
    /// Not enough input, or no such combination yet.
    Unresolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Resolved,
    Unresolved,
}

/// Decide what the draft resolves to, without touching it.
pub fn resolve<'a>(catalog: &'a Catalog, draft: &EntryDraft) -> Resolution<'a> {
    if !draft.job_code.is_empty() {
        return match catalog.find_job(&draft.job_code) {
            Some(hit) => Resolution::Code(hit),
            None => Resolution::CodeNotFound,
        };
    }

    if draft.product.is_empty() || draft.process.is_empty() {
        return Resolution::Unresolved;
    }

    match match_fields(catalog.works(), &draft.product, &draft.process, &draft.part_no) {
        Some(hit) => Resolution::Fields(hit),
        None => Resolution::Unresolved,
    }
}

/// Pick the catalog row for a product/process pair.
///
/// With a part number, only an exact part match counts. Without one, a row
/// with an empty part number wins; failing that the first candidate in
/// catalog order is taken.
pub fn match_fields<'a>(
    works: &'a [WorkItemRecord],
    product: &str,
    process: &str,
    part_no: &str,
) -> Option<&'a WorkItemRecord> {
    let mut candidates = works.iter().filter(|w| w.matches(product, process));

    if !part_no.is_empty() {
        return candidates.find(|w| w.part_no == part_no);
    }

    let candidates: Vec<&WorkItemRecord> = candidates.collect();
    candidates
        .iter()
        .find(|w| w.part_no.is_empty())
        .or_else(|| candidates.first())
        .copied()
}

/// Write one resolution into the draft.
///
/// An unknown job code forces the unit price to 0 and leaves product,
/// process and part as they were.
pub fn apply(draft: &mut EntryDraft, resolution: Resolution<'_>) -> AppResult<Settled> {
    match resolution {
        Resolution::Code(hit) => {
            draft.product = hit.product.clone();
            draft.process = hit.process.clone();
            draft.part_no = hit.part_no.clone();
            draft.unit_price = hit.unit_price;
            Ok(Settled::Resolved)
        }
        Resolution::CodeNotFound => {
            draft.unit_price = 0.0;
            Err(AppError::JobCodeNotFound(draft.job_code.clone()))
        }
        Resolution::Fields(hit) => {
            draft.job_code = hit.job_code.clone();
            draft.unit_price = hit.unit_price;
            Ok(Settled::Resolved)
        }
        Resolution::Unresolved => Ok(Settled::Unresolved),
    }
}

/// Run resolution until the draft is stable.
///
/// A fields → code pass that adopts a job code is followed by one
/// code → fields pass, so the part number and price always reflect the
/// adopted row. Running this again on the result changes nothing.
pub fn settle(catalog: &Catalog, draft: &mut EntryDraft) -> AppResult<Settled> {
    let first = resolve(catalog, draft);
    let adopted_code = matches!(first, Resolution::Fields(_));
    let settled = apply(draft, first)?;

    if adopted_code {
        let second = resolve(catalog, draft);
        return apply(draft, second);
    }

    Ok(settled)
}
