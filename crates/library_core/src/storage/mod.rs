//! Durable text resources behind the catalog and roster stores.
//!
//! # Responsibility
//! - Read and replace whole text blobs for the stores.
//! - Hide whether a blob lives on disk or in memory.
//!
//! # Invariants
//! - A missing resource reads as empty text and is created empty.
//! - A failed write never leaves a half-written resource behind.
//! - Stores refuse to write a resource whose last load failed.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::PathBuf;

mod file;
mod memory;

pub use file::FileResource;
pub use memory::MemoryResource;

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io { resource: String, source: io::Error },
    NotAFile(PathBuf),
    /// The last load of this resource failed; writing would discard its
    /// unread contents.
    UnreadResource(String),
}

impl StorageError {
    pub(crate) fn io(resource: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            resource: resource.into(),
            source,
        }
    }
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { resource, source } => write!(f, "{resource}: {source}"),
            Self::NotAFile(path) => write!(f, "{} exists but is not a file", path.display()),
            Self::UnreadResource(resource) => write!(
                f,
                "{resource}: refusing to overwrite a resource that failed to load"
            ),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::NotAFile(_) | Self::UnreadResource(_) => None,
        }
    }
}

/// Whole-blob access to one persisted resource.
pub trait TextResource {
    /// Returns the full contents, creating the resource empty when missing.
    fn read_all(&mut self) -> StorageResult<String>;

    /// Replaces the full contents.
    fn write_all(&mut self, text: &str) -> StorageResult<()>;

    /// Short label used in log events and error messages.
    fn label(&self) -> String;
}
