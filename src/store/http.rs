//! Spreadsheet web-app client.
//!
//! Reads are `GET ?action=<table>&key=<api key>`, the write is a `POST`
//! with a JSON body sent as `text/plain` (the web-app host only accepts
//! simple requests). Every response is an envelope
//! `{ "ok": bool, "data": ..., "error": "..." }`.

use crate::errors::{AppError, AppResult};
use crate::models::record::PersistedRecord;
use crate::models::work_item::WorkItemRecord;
use crate::models::worker::WorkerRecord;
use crate::store::{CatalogSource, RecordSink};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const USER_AGENT: &str = concat!("piecelog/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    data: serde_json::Value,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Serialize)]
struct AddRecordRequest<'a> {
    action: &'static str,
    key: &'a str,
    payload: &'a PersistedRecord,
}

pub struct SheetClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SheetClient {
    pub fn new(base_url: &str, api_key: &str) -> AppResult<Self> {
        if base_url.trim().is_empty() {
            return Err(AppError::Config(
                "store_url is not set (run `piecelog config --edit` or set PIECELOG_STORE_URL)"
                    .into(),
            ));
        }

        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim().to_string(),
            api_key: api_key.to_string(),
        })
    }

    async fn fetch_table<T: DeserializeOwned>(&self, action: &str, fallback: &str) -> AppResult<Vec<T>> {
        tracing::debug!(action, "fetching catalog table");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("action", action), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let data = unwrap_envelope(response, fallback).await?;
        Ok(serde_json::from_value(data)?)
    }
}

/// Accept the response only when both the HTTP status and the envelope say ok.
async fn unwrap_envelope(response: reqwest::Response, fallback: &str) -> AppResult<serde_json::Value> {
    let status = response.status();
    let body = response.text().await?;
    let envelope: Envelope = serde_json::from_str(&body)?;

    if !status.is_success() || !envelope.ok {
        tracing::warn!(status = status.as_u16(), error = ?envelope.error, "store rejected request");
        return Err(AppError::Store(
            envelope
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| fallback.to_string()),
        ));
    }

    Ok(envelope.data)
}

impl CatalogSource for SheetClient {
    async fn fetch_workers(&self) -> AppResult<Vec<WorkerRecord>> {
        self.fetch_table("workers", "fetchWorkers failed").await
    }

    async fn fetch_works(&self) -> AppResult<Vec<WorkItemRecord>> {
        self.fetch_table("works", "fetchWorks failed").await
    }
}

impl RecordSink for SheetClient {
    async fn add_record(&self, record: &PersistedRecord) -> AppResult<()> {
        let body = serde_json::to_string(&AddRecordRequest {
            action: "addRecord",
            key: &self.api_key,
            payload: record,
        })?;

        tracing::debug!(record_id = %record.record_id, "posting record");

        let response = self
            .http_client
            .post(&self.base_url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await?;

        unwrap_envelope(response, "addRecord failed").await?;
        Ok(())
    }
}
