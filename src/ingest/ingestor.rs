//! Snapshot building and refresh orchestration.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::error::ArchiveError;
use crate::models::{ArchiveSnapshot, Toot};
use crate::parsers::stream_outbox;
use crate::snapshot_store;

/// Freshness policy for [`load_or_refresh`].
///
/// `force_rebuild` bypasses the hash check entirely; `skip_update` keeps a
/// stale snapshot instead of re-ingesting. When both are set, the rebuild
/// wins (an explicit rebuild request is stronger than "don't update").
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshPolicy {
    pub force_rebuild: bool,
    pub skip_update: bool,
}

/// Outcome of one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestReport {
    pub snapshot: ArchiveSnapshot,
    /// Signed record-count delta against the prior snapshot. This is a count
    /// only, not an added/removed id set: re-ingestion replaces the whole
    /// mapping.
    pub delta: i64,
    /// True when the export changed but `skip_update` kept the old snapshot.
    pub stale: bool,
}

/// Hex SHA-256 over the exact bytes used for the freshness check.
pub fn content_hash(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Load the cached snapshot or (re)build it from the export.
///
/// Reads the whole export once, hashes it, and compares against any prior
/// snapshot in `cache_dir`:
///
/// - no usable prior snapshot, or `policy.force_rebuild` → full ingest,
///   `delta = +n`
/// - hash unchanged → prior snapshot as-is, `delta = 0`, no re-parse
/// - hash changed with `policy.skip_update` → prior snapshot as-is,
///   `delta = 0`, flagged stale
/// - hash changed → full re-ingest, `delta = new - old`
///
/// Every path that builds a new snapshot persists it (snapshot blob plus
/// digest file) so the next run can reuse it.
///
/// # Errors
///
/// Returns [`ArchiveError::FileAccess`] if the export cannot be read and
/// [`ArchiveError::MalformedExport`] if any activity fails to parse. Both
/// are fatal to startup. Cache problems never surface here; they downgrade
/// to a rebuild.
pub fn load_or_refresh(
    outbox: &Path,
    cache_dir: &Path,
    policy: &RefreshPolicy,
) -> Result<IngestReport, ArchiveError> {
    let bytes = fs::read(outbox).map_err(|e| ArchiveError::file_access(outbox, e))?;
    let new_hash = content_hash(&bytes);

    let prior = if policy.force_rebuild { None } else { snapshot_store::load_snapshot(cache_dir) };

    let Some(prior) = prior else {
        let records = ingest_records(&bytes)?;
        let delta = records.len() as i64;
        eprintln!("Ingested {} records from {}", records.len(), outbox.display());
        let snapshot = ArchiveSnapshot { content_hash: new_hash, records, built_at: Utc::now() };
        snapshot_store::save_snapshot(cache_dir, &snapshot)?;
        return Ok(IngestReport { snapshot, delta, stale: false });
    };

    if prior.content_hash == new_hash {
        eprintln!("Archive unchanged ({} records)", prior.len());
        return Ok(IngestReport { snapshot: prior, delta: 0, stale: false });
    }

    if policy.skip_update {
        eprintln!(
            "Archive changed but updates are disabled; serving the cached snapshot ({} records)",
            prior.len()
        );
        return Ok(IngestReport { snapshot: prior, delta: 0, stale: true });
    }

    let records = ingest_records(&bytes)?;
    let delta = records.len() as i64 - prior.len() as i64;
    match delta {
        d if d > 0 => eprintln!("Archive changed: {d} records added"),
        d if d < 0 => eprintln!("Archive changed: {} records removed", -d),
        _ => eprintln!("Archive changed: record count unchanged"),
    }
    let snapshot = ArchiveSnapshot { content_hash: new_hash, records, built_at: Utc::now() };
    snapshot_store::save_snapshot(cache_dir, &snapshot)?;
    Ok(IngestReport { snapshot, delta, stale: false })
}

/// Single streaming pass over the export, buffered into the id map.
fn ingest_records(bytes: &[u8]) -> Result<BTreeMap<String, Toot>, ArchiveError> {
    let mut records = BTreeMap::new();
    stream_outbox(bytes, |toot| {
        records.insert(toot.id.clone(), toot);
    })?;
    Ok(records)
}
