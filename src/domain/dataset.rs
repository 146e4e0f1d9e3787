// Dataset domain models (summary, history, raw rows, uploads)
use bytes::Bytes;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Computed summary of the latest dataset.
///
/// The server flattens the dataset metadata into the same object, so those
/// fields are optional here; history entries embed the summary without them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DatasetSummary {
    #[serde(default)]
    pub dataset_id: Option<i64>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default)]
    pub averages: BTreeMap<String, Option<f64>>,
    /// Equipment type counts, in the order the server sent them.
    #[serde(default)]
    pub type_distribution: IndexMap<String, u64>,
}

impl DatasetSummary {
    pub fn average(&self, column: &str) -> Option<f64> {
        self.averages.get(column).copied().flatten()
    }
}

/// One row of `/history/`, newest first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub dataset_id: i64,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(default)]
    pub summary: Option<DatasetSummary>,
}

impl HistoryEntry {
    pub fn total_count(&self) -> Option<u64> {
        self.summary.as_ref().and_then(|s| s.total_count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HistoryPage {
    #[serde(default)]
    pub items: Vec<HistoryEntry>,
}

/// Raw CSV rows of the latest dataset (capped by the server).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRowsView {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub rows: Vec<Map<String, Value>>,
    #[serde(default)]
    pub total_rows: Option<u64>,
}

impl RawRowsView {
    pub fn is_empty(&self) -> bool {
        self.filename.is_empty() && self.rows.is_empty()
    }
}

/// A CSV file selected for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn csv(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content_type: "text/csv".to_string(),
            bytes: bytes.into(),
        }
    }
}

/// Response body of a successful `/upload/`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UploadReceipt {
    pub dataset_id: i64,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: DatasetSummary,
}
