//! Unified application error type.
//! All modules (store, core, db, cli, config) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local journal
    // ---------------------------
    #[error("Journal error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Remote store
    // ---------------------------
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog could not be loaded; the form stays blocked.
    #[error("Catalog load failed: {0}")]
    Load(String),

    /// The store answered but refused the record. Message is verbatim.
    #[error("{0}")]
    Store(String),

    // ---------------------------
    // Entry logic
    // ---------------------------
    #[error("Job code '{0}' was not found in the work catalog. Check the code.")]
    JobCodeNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("The {0} field follows the job code. Clear the job code first.")]
    FieldLocked(&'static str),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Scanner error: {0}")]
    Scanner(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file is not valid YAML: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

/// Submission preconditions, checked in declaration order.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Record ID is empty.")]
    MissingRecordId,

    #[error("Worker code is required.")]
    MissingWorker,

    #[error("Job code is required (scan it, type it, or pick product and process).")]
    MissingJobCode,

    #[error("Product is required.")]
    MissingProduct,

    #[error("Process is required.")]
    MissingProcess,

    #[error("Work date is required.")]
    MissingWorkDate,

    #[error("Quantity is not a number.")]
    QuantityNotNumber,

    #[error("Quantity must be greater than 0.")]
    QuantityNotPositive,

    #[error("Unit price could not be read (check the work catalog).")]
    InvalidUnitPrice,
}

pub type AppResult<T> = Result<T, AppError>;
