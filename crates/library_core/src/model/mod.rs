//! Domain records for the library catalog and member roster.
//!
//! # Responsibility
//! - Define the book and member records owned by the stores.
//! - Keep cross-references between records as plain identifiers.
//!
//! # Invariants
//! - Identifiers are immutable once a record exists.
//! - A member's issued list refers to books by id only; it never owns them.

pub mod book;
pub mod member;
