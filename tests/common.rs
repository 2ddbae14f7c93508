#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::NaiveDate;
use piecelog::core::catalog::Catalog;
use piecelog::core::scan::{CodeScanner, DecodeEvent};
use piecelog::errors::{AppError, AppResult};
use piecelog::models::draft::EntryDraft;
use piecelog::models::record::PersistedRecord;
use piecelog::models::work_item::WorkItemRecord;
use piecelog::models::worker::WorkerRecord;
use piecelog::store::{CatalogSource, RecordSink};
use std::collections::VecDeque;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Binary under test, with HOME pointed at an isolated directory and no
/// store endpoint inherited from the environment.
pub fn pl(home: &PathBuf) -> Command {
    let mut cmd = cargo_bin_cmd!("piecelog");
    cmd.env("HOME", home)
        .env_remove("PIECELOG_STORE_URL")
        .env_remove("PIECELOG_API_KEY");
    cmd
}

/// Create a fresh, empty HOME for one test.
pub fn setup_test_home(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_piecelog_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create test home");
    path
}

/// Journal path inside the test HOME.
pub fn journal_in(home: &PathBuf) -> String {
    home.join("journal.sqlite").to_string_lossy().to_string()
}

/// Temporary output file path, removed beforehand.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_piecelog_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

pub fn sample_workers() -> Vec<WorkerRecord> {
    vec![
        WorkerRecord::new("W01", "Sato"),
        WorkerRecord::new("W02", "Suzuki"),
    ]
}

/// Widget/Cut has two rows (part "" and part "A"), Widget/Fold has only
/// non-empty parts, Gadget/Paint a single row.
pub fn sample_works() -> Vec<WorkItemRecord> {
    vec![
        WorkItemRecord::new("J1", "Widget", "Cut", "", 100.0),
        WorkItemRecord::new("J2", "Widget", "Cut", "A", 200.0),
        WorkItemRecord::new("J3", "Widget", "Fold", "B", 50.0),
        WorkItemRecord::new("J4", "Widget", "Fold", "C", 60.0),
        WorkItemRecord::new("J5", "Gadget", "Paint", "", 12.5),
    ]
}

pub fn sample_catalog() -> Catalog {
    Catalog::new(sample_workers(), sample_works())
}

/// A draft that passes every submission check: 12 × 150.
pub fn ready_draft() -> EntryDraft {
    let mut d = EntryDraft::new(day());
    d.worker_code = "W01".into();
    d.job_code = "J9".into();
    d.product = "Widget".into();
    d.process = "Press".into();
    d.quantity = "12".into();
    d.unit_price = 150.0;
    d
}

#[derive(Default)]
pub enum WriteMode {
    #[default]
    Immediate,
    /// Yield once before writing, so a concurrent caller gets polled.
    YieldFirst,
    /// Never completes.
    Hang,
}

/// In-memory stand-in for the spreadsheet store.
#[derive(Default)]
pub struct MemoryStore {
    pub workers: Vec<WorkerRecord>,
    pub works: Vec<WorkItemRecord>,
    pub fail_catalog: bool,
    pub fail_write: Option<String>,
    pub mode: WriteMode,
    pub calls: AtomicUsize,
    pub records: Mutex<Vec<PersistedRecord>>,
}

impl MemoryStore {
    pub fn with_catalog() -> Self {
        Self {
            workers: sample_workers(),
            works: sample_works(),
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<PersistedRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CatalogSource for MemoryStore {
    async fn fetch_workers(&self) -> AppResult<Vec<WorkerRecord>> {
        if self.fail_catalog {
            return Err(AppError::Store("fetchWorkers failed".into()));
        }
        Ok(self.workers.clone())
    }

    async fn fetch_works(&self) -> AppResult<Vec<WorkItemRecord>> {
        Ok(self.works.clone())
    }
}

impl RecordSink for MemoryStore {
    async fn add_record(&self, record: &PersistedRecord) -> AppResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            WriteMode::Immediate => {}
            WriteMode::YieldFirst => tokio::task::yield_now().await,
            WriteMode::Hang => std::future::pending::<()>().await,
        }
        if let Some(msg) = &self.fail_write {
            return Err(AppError::Store(msg.clone()));
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

/// Scanner fed from a fixed list of events.
#[derive(Default)]
pub struct ScriptedScanner {
    pub events: VecDeque<AppResult<DecodeEvent>>,
    pub stops: usize,
    pub fail_stop: bool,
}

impl ScriptedScanner {
    pub fn new(events: Vec<AppResult<DecodeEvent>>) -> Self {
        Self {
            events: events.into(),
            ..Default::default()
        }
    }
}

impl CodeScanner for ScriptedScanner {
    async fn next_event(&mut self) -> AppResult<Option<DecodeEvent>> {
        match self.events.pop_front() {
            Some(Ok(ev)) => Ok(Some(ev)),
            Some(Err(e)) => Err(e),
            None => Ok(None),
        }
    }

    async fn stop(&mut self) -> AppResult<()> {
        self.stops += 1;
        if self.fail_stop {
            return Err(AppError::Scanner("already stopped".into()));
        }
        Ok(())
    }
}
