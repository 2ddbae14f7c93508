//! Reference catalog: workers and work items, loaded once per run.

use crate::errors::{AppError, AppResult};
use crate::models::work_item::WorkItemRecord;
use crate::models::worker::WorkerRecord;
use crate::store::CatalogSource;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    workers: Vec<WorkerRecord>,
    works: Vec<WorkItemRecord>,
}

impl Catalog {
    /// Build a catalog keeping the load order. Job codes are unique keys:
    /// a repeated code keeps its first row.
    pub fn new(workers: Vec<WorkerRecord>, works: Vec<WorkItemRecord>) -> Self {
        let mut seen = HashSet::new();
        let works = works
            .into_iter()
            .filter(|w| {
                if seen.insert(w.job_code.clone()) {
                    true
                } else {
                    tracing::warn!(job_code = %w.job_code, "duplicate job code in work catalog, keeping first row");
                    false
                }
            })
            .collect();

        Self { workers, works }
    }

    /// Fetch both tables concurrently. Either failure blocks the form.
    pub async fn load<S: CatalogSource>(source: &S) -> AppResult<Self> {
        let (workers, works) = tokio::try_join!(source.fetch_workers(), source.fetch_works())
            .map_err(|e| AppError::Load(e.to_string()))?;

        tracing::info!(
            workers = workers.len(),
            works = works.len(),
            "reference catalog loaded"
        );

        Ok(Self::new(workers, works))
    }

    pub fn workers(&self) -> &[WorkerRecord] {
        &self.workers
    }

    pub fn works(&self) -> &[WorkItemRecord] {
        &self.works
    }

    pub fn find_job(&self, job_code: &str) -> Option<&WorkItemRecord> {
        self.works.iter().find(|w| w.job_code == job_code)
    }

    pub fn find_worker(&self, worker_code: &str) -> Option<&WorkerRecord> {
        self.workers.iter().find(|w| w.worker_code == worker_code)
    }

    pub fn worker_label(&self, worker_code: &str) -> String {
        self.find_worker(worker_code)
            .map(WorkerRecord::label)
            .unwrap_or_else(|| worker_code.to_string())
    }

    pub fn product_choices(&self) -> Vec<String> {
        uniq_sorted(self.works.iter().map(|w| w.product.as_str()), false)
    }

    /// Processes offered for `product`, or every process when none is picked.
    pub fn process_choices(&self, product: &str) -> Vec<String> {
        uniq_sorted(
            self.works
                .iter()
                .filter(|w| product.is_empty() || w.product == product)
                .map(|w| w.process.as_str()),
            false,
        )
    }

    /// Part numbers offered for the current product/process. The empty part
    /// number is a legitimate choice and is kept.
    pub fn part_choices(&self, product: &str, process: &str) -> Vec<String> {
        uniq_sorted(
            self.works
                .iter()
                .filter(|w| product.is_empty() || w.product == product)
                .filter(|w| process.is_empty() || w.process == process)
                .map(|w| w.part_no.as_str()),
            true,
        )
    }
}

fn uniq_sorted<'a>(values: impl Iterator<Item = &'a str>, keep_empty: bool) -> Vec<String> {
    let mut out: Vec<String> = values
        .filter(|v| keep_empty || !v.is_empty())
        .map(str::to_string)
        .collect();

    match Collator::try_new(&locale!("ja").into(), CollatorOptions::new()) {
        Ok(collator) => out.sort_by(|a, b| collator.compare(a, b).then_with(|| a.cmp(b))),
        Err(e) => {
            tracing::warn!(error = ?e, "ja collator unavailable, sorting by code point");
            out.sort();
        }
    }
    out.dedup();
    out
}
