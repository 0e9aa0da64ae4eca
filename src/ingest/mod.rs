//! Ingestion: export → snapshot, with hash-based change detection.
//!
//! # Error Handling Strategy
//!
//! Two layers with opposite policies:
//!
//! - **Export layer**: an unreadable export or a malformed activity is fatal.
//!   The archive is the source of truth; if it cannot be read in full, there
//!   is nothing correct to serve and the process must not start serving.
//!
//! - **Cache layer**: everything is recoverable. A missing, corrupt, or
//!   version-mismatched snapshot simply means "no prior snapshot" and
//!   triggers a full rebuild from the export, with an informational line on
//!   stderr.
//!
//! Operator feedback ("N records added", "archive unchanged") is reported on
//! stderr at the end of each run.

pub mod ingestor;

pub use ingestor::{IngestReport, RefreshPolicy, content_hash, load_or_refresh};
