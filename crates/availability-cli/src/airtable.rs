//! Minimal Airtable list-records client used by `availability sync`.
//!
//! Airtable returns at most one page of records per request. A page that
//! carries an `offset` has a successor; the last page has none.

use std::future::Future;
use std::path::Path;

use availability_engine::EventRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.airtable.com";
pub const DEFAULT_TABLE_ID: &str = "tbl1ucQlM87KGxyjI";

#[derive(Debug, Error)]
pub enum AirtableError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Airtable API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// One table row. `fields` is kept verbatim, in the order Airtable sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(rename = "createdTime")]
    pub created_time: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

/// One page of the list-records response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPage {
    pub records: Vec<AirtableRecord>,
    #[serde(default)]
    pub offset: Option<String>,
}

/// Client for one Airtable base.
pub struct AirtableClient {
    http: reqwest::Client,
    token: String,
    base_id: String,
    base_url: String,
}

impl AirtableClient {
    /// Creates a client for `base_id` on the API host at `base_url`.
    pub fn with_base_url(
        token: impl Into<String>,
        base_id: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.into(),
            base_id: base_id.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/v0/{}/{}", self.base_url, self.base_id, table)
    }

    /// Fetch one page, starting at `offset` when given.
    #[instrument(skip(self, offset), fields(has_offset = offset.is_some()))]
    pub async fn fetch_page(
        &self,
        table: &str,
        offset: Option<String>,
    ) -> Result<RecordPage, AirtableError> {
        let mut request = self
            .http
            .get(self.table_url(table))
            .header("Authorization", format!("Bearer {}", self.token));
        if let Some(offset) = &offset {
            request = request.query(&[("offset", offset)]);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AirtableError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let page: RecordPage = serde_json::from_str(&body)?;
        debug!(records = page.records.len(), "fetched page");
        Ok(page)
    }

    /// Fetch every record of `table`, following offsets to the last page.
    pub async fn fetch_all(&self, table: &str) -> Result<Vec<AirtableRecord>, AirtableError> {
        collect_pages(move |offset| self.fetch_page(table, offset)).await
    }
}

/// Pull the human-readable message out of an Airtable error body.
///
/// Airtable sends either `{"error": {"type": ..., "message": ...}}` or
/// `{"error": "NOT_FOUND"}`. Anything else is returned as-is.
fn api_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    match value.get("error") {
        Some(Value::String(code)) => code.clone(),
        Some(Value::Object(err)) => err
            .get("message")
            .or_else(|| err.get("type"))
            .and_then(Value::as_str)
            .unwrap_or(body)
            .to_string(),
        _ => body.to_string(),
    }
}

/// Drive `fetch_page` until a page comes back without an offset.
///
/// Records are concatenated in page order.
pub async fn collect_pages<F, Fut>(mut fetch_page: F) -> Result<Vec<AirtableRecord>, AirtableError>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<RecordPage, AirtableError>>,
{
    let mut records = Vec::new();
    let mut offset = None;

    loop {
        let page = fetch_page(offset.take()).await?;
        info!(count = page.records.len(), "fetched records");
        records.extend(page.records);

        match page.offset {
            Some(next) => offset = Some(next),
            None => break,
        }
    }

    Ok(records)
}

/// Log a warning for every record the calendar would misread.
///
/// Records are never dropped: the calendar falls back to minute 0 for bad
/// times and never matches a record whose `Date` it cannot read. Returns the
/// number of records warned about.
pub fn check_records(records: &[AirtableRecord]) -> usize {
    let mut flagged = 0;

    for record in records {
        let parsed = serde_json::from_value::<EventRecord>(Value::Object(record.fields.clone()));
        let problem = match parsed {
            Ok(event) => event.validate().err().map(|e| e.to_string()),
            Err(e) => Some(e.to_string()),
        };

        if let Some(problem) = problem {
            warn!(id = %record.id, %problem, "record will not render as intended");
            flagged += 1;
        }
    }

    flagged
}

/// Write records as a pretty-printed JSON array, creating parent directories.
pub fn write_snapshot(path: &Path, records: &[AirtableRecord]) -> Result<(), AirtableError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json)?;
    Ok(())
}
