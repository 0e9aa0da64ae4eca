//! Persistent snapshot storage.
//!
//! Caches the ingested archive to disk so repeated runs skip the parse when
//! nothing changed. Two-file layout, both opaque to everything but this
//! module and the ingestor:
//! - `export-digest.json`: JSON digest record (schema version, last-seen
//!   export hash, build time)
//! - `snapshot.bin`: bincode-serialized [`ArchiveSnapshot`]
//!
//! Any failure to read either file back degrades to "no prior snapshot";
//! cache corruption is never fatal.

pub mod persistence;

pub use persistence::{load_snapshot, save_snapshot};
