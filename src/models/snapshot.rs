use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Toot;

/// The persisted cache: a content hash of the raw export plus the fully
/// materialized record collection.
///
/// A snapshot is fresh when `content_hash` matches the export's current
/// digest. The ingestor owns creation and replacement; everything else reads
/// it immutably.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveSnapshot {
    /// Hex SHA-256 of the exact export bytes used for the freshness check.
    pub content_hash: String,
    /// Record collection keyed by id. BTreeMap keeps serialization
    /// deterministic across runs.
    pub records: BTreeMap<String, Toot>,
    pub built_at: DateTime<Utc>,
}

impl ArchiveSnapshot {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
