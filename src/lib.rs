//! Masto Archive Viewer - Browse and search a Mastodon content export
//!
//! This library ingests a Mastodon export archive (an `outbox.json` activity
//! log plus an `actor.json` profile) into an in-memory, queryable index and
//! serves date-bucketed or full-text-search views of it. It supports:
//!
//! - Streaming extraction of posts from the ordered export, without
//!   materializing the whole log
//! - Persistent snapshotting with content-hash change detection across runs
//! - Month-bucket indexing for date navigation
//! - Whole-word, case-insensitive search that re-derives a month histogram
//!   over the result subset
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use masto_archive_viewer::ingest::{RefreshPolicy, load_or_refresh};
//! use masto_archive_viewer::month_index::MonthIndex;
//!
//! let report = load_or_refresh(
//!     Path::new("archive/outbox.json"),
//!     Path::new("archive/.snapshot-cache"),
//!     &RefreshPolicy::default(),
//! )?;
//! let index = MonthIndex::build(report.snapshot.records.values())?;
//! println!("{} toots across {} months", report.snapshot.len(), index.years().len() * 12);
//! # Ok::<(), masto_archive_viewer::error::ArchiveError>(())
//! ```

pub mod cli;
pub mod error;
pub mod ingest;
pub mod models;
pub mod month_index;
pub mod parsers;
pub mod render;
pub mod search;
pub mod server;
pub mod snapshot_store;
pub mod view;

// Re-export commonly used types
pub use error::ArchiveError;
pub use ingest::{IngestReport, RefreshPolicy, load_or_refresh};
pub use models::{Actor, ArchiveSnapshot, Toot};
pub use month_index::MonthIndex;
pub use search::search;
pub use view::{ResolvedView, ViewState, resolve};
