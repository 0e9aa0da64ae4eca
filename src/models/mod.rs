//! Data models for an exported Mastodon archive.
//!
//! - [`Toot`] - a single archived post with content, attachments, and an
//!   optional poll
//! - [`Actor`] - the archive owner's profile
//! - [`ArchiveSnapshot`] - the persisted cache of ingested records plus the
//!   export's content hash
//!
//! Everything here is immutable once ingested: records are created by the
//! ingestor during a parse pass and never mutated afterwards, which is what
//! lets the serving phase share them across request handlers without locks.

pub mod actor;
pub mod snapshot;
pub mod toot;

pub use actor::Actor;
pub use snapshot::ArchiveSnapshot;
pub use toot::{Attachment, Poll, PollKind, PollOption, Toot};
