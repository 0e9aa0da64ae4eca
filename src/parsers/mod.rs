//! Parsers for the ActivityPub export files.
//!
//! # Error Handling Strategy
//!
//! Archives are assumed syntactically well-formed: they are produced by the
//! instance's export machinery, not typed by hand. A malformed activity or
//! object therefore aborts the entire ingestion with
//! [`ArchiveError::MalformedExport`](crate::error::ArchiveError) rather than
//! being skipped, and an unreadable file fails with `FileAccess` before any
//! record is produced. There is no per-record recovery on this path; the
//! recoverable layer is the snapshot cache, not the export itself.

pub mod actor;
pub mod deserializers;
pub mod outbox;

pub use actor::load_actor;
pub use outbox::stream_outbox;
