//! Core domain logic for the library ledger.
//! This crate owns the persisted record format and every loan invariant.

pub mod codec;
pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use codec::{ParseError, ParseErrorKind};
pub use config::{LibraryConfig, ReturnPolicy};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookId};
pub use model::member::{Member, MemberId};
pub use repo::catalog_repo::{BookMatches, CatalogStore, SortKey, UnknownSortKey};
pub use repo::roster_repo::RosterStore;
pub use repo::LoadReport;
pub use service::library_service::{LibraryError, LibraryLoad, LibraryResult, LibraryService};
pub use storage::{FileResource, MemoryResource, StorageError, StorageResult, TextResource};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
