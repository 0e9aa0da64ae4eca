//! Error taxonomy for the archive pipeline.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can go wrong between an export on disk and a served view.
///
/// `FileAccess` and `MalformedExport` are fatal to startup. `CorruptCache` is
/// recoverable: the snapshot store reports it and the ingestor rebuilds from
/// the export. `EmptyCollection` means there is nothing to index.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("cannot access {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed export: {detail}")]
    MalformedExport { detail: String },

    #[error("corrupt snapshot cache: {detail}")]
    CorruptCache { detail: String },

    #[error("the collection contains no records")]
    EmptyCollection,
}

impl ArchiveError {
    pub(crate) fn file_access(path: impl AsRef<Path>, source: io::Error) -> Self {
        ArchiveError::FileAccess { path: path.as_ref().to_path_buf(), source }
    }
}
