//! The static JSON snapshot the calendar loads.
//!
//! A snapshot is the array of table records exactly as the sync writes them:
//! `[{ "id": "...", "createdTime": "...", "fields": { "Status": ... } }]`.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::EventRecord;

/// One row of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "createdTime", default)]
    pub created_time: String,
    pub fields: EventRecord,
}

/// A parsed snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub records: Vec<SnapshotRecord>,
}

impl Snapshot {
    /// # Errors
    /// Returns `ScheduleError::Snapshot` if `json` is not an array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The `fields` of every record, in snapshot order.
    pub fn events(&self) -> Vec<EventRecord> {
        self.records.iter().map(|r| r.fields.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Parse a snapshot and keep only each record's `fields`.
pub fn load_snapshot(json: &str) -> Result<Vec<EventRecord>> {
    let snapshot = Snapshot::from_json(json)?;
    tracing::debug!(records = snapshot.len(), "loaded snapshot");
    Ok(snapshot.events())
}
