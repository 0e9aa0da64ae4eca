//! Snapshot persistence: load/save with atomic writes.

use std::fs;
use std::path::{Path, PathBuf};

use bincode::config;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ArchiveError;
use crate::models::ArchiveSnapshot;

const DIGEST_FILENAME: &str = "export-digest.json";
const SNAPSHOT_FILENAME: &str = "snapshot.bin";

/// Cache schema version for invalidation on format changes
pub const CACHE_VERSION: u32 = 1;

/// Sidecar digest record; small enough to inspect without deserializing the
/// snapshot blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExportDigest {
    version: u32,
    content_hash: String,
    built_at: DateTime<Utc>,
}

fn digest_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(DIGEST_FILENAME)
}

fn snapshot_path(cache_dir: &Path) -> PathBuf {
    cache_dir.join(SNAPSHOT_FILENAME)
}

/// Load the cached snapshot, if a usable one exists.
///
/// Returns `None` when the cache is missing, of a different schema version,
/// or corrupt; corruption is logged and the caller rebuilds from the export.
pub fn load_snapshot(cache_dir: &Path) -> Option<ArchiveSnapshot> {
    match try_load(cache_dir) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Cache unusable ({e}), rebuilding from the export");
            None
        }
    }
}

fn try_load(cache_dir: &Path) -> Result<Option<ArchiveSnapshot>, ArchiveError> {
    let digest_path = digest_path(cache_dir);
    let snapshot_path = snapshot_path(cache_dir);
    if !digest_path.exists() || !snapshot_path.exists() {
        return Ok(None);
    }

    let digest_json = fs::read_to_string(&digest_path)
        .map_err(|e| corrupt(format!("failed to read digest file: {e}")))?;
    let digest: ExportDigest = serde_json::from_str(&digest_json)
        .map_err(|e| corrupt(format!("failed to parse digest file: {e}")))?;

    if digest.version != CACHE_VERSION {
        eprintln!(
            "Cache version mismatch (expected {CACHE_VERSION}, found {}), rebuilding",
            digest.version
        );
        return Ok(None);
    }

    let snapshot_bytes = fs::read(&snapshot_path)
        .map_err(|e| corrupt(format!("failed to read snapshot file: {e}")))?;
    let snapshot: ArchiveSnapshot =
        bincode::serde::decode_from_slice(&snapshot_bytes, config::standard())
            .map_err(|e| corrupt(format!("failed to deserialize snapshot: {e}")))?
            .0;

    // The digest is the authority for freshness checks; disagreement means
    // one of the two files was replaced without the other.
    if snapshot.content_hash != digest.content_hash {
        return Err(corrupt("digest and snapshot disagree on the export hash".to_string()));
    }

    Ok(Some(snapshot))
}

/// Save the snapshot and its digest record atomically (temp file + rename).
///
/// # Errors
///
/// Returns [`ArchiveError::FileAccess`] when the cache directory cannot be
/// created or written.
pub fn save_snapshot(cache_dir: &Path, snapshot: &ArchiveSnapshot) -> Result<(), ArchiveError> {
    fs::create_dir_all(cache_dir).map_err(|e| ArchiveError::file_access(cache_dir, e))?;

    let digest = ExportDigest {
        version: CACHE_VERSION,
        content_hash: snapshot.content_hash.clone(),
        built_at: snapshot.built_at,
    };
    let digest_json = serde_json::to_string_pretty(&digest)
        .map_err(|e| corrupt(format!("failed to serialize digest: {e}")))?;
    write_atomic(&digest_path(cache_dir), digest_json.as_bytes())?;

    let snapshot_bytes = bincode::serde::encode_to_vec(snapshot, config::standard())
        .map_err(|e| corrupt(format!("failed to serialize snapshot: {e}")))?;
    write_atomic(&snapshot_path(cache_dir), &snapshot_bytes)?;

    Ok(())
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), ArchiveError> {
    let temp = path.with_extension("tmp");
    fs::write(&temp, bytes).map_err(|e| ArchiveError::file_access(&temp, e))?;
    fs::rename(&temp, path).map_err(|e| ArchiveError::file_access(path, e))?;
    Ok(())
}

fn corrupt(detail: String) -> ArchiveError {
    ArchiveError::CorruptCache { detail }
}
