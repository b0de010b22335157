//! Library use-case services.
//!
//! # Responsibility
//! - Coordinate the catalog and roster stores for cross-record operations.
//! - Persist both stores after every successful mutation.

pub mod library_service;
