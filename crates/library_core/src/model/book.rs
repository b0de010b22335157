//! Book record.
//!
//! # Responsibility
//! - Hold catalog fields and the loan flag for one book.
//!
//! # Invariants
//! - `id` never changes after construction.
//! - `issued` is true while exactly one member lists this id; the stores
//!   trust issue/return ordering for that side of the relation.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Catalog identifier for a book.
pub type BookId = i32;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    /// Serialized as `is_issued` to match the persisted flag name.
    #[serde(rename = "is_issued")]
    pub issued: bool,
}

impl Book {
    /// Creates a book that is not on loan.
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            category: category.into(),
            issued: false,
        }
    }

    pub fn mark_issued(&mut self) {
        self.issued = true;
    }

    pub fn mark_returned(&mut self) {
        self.issued = false;
    }

    /// Returns whether the book can be lent out.
    pub fn is_available(&self) -> bool {
        !self.issued
    }
}

impl Display for Book {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Book ID: {}", self.id)?;
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Author: {}", self.author)?;
        writeln!(f, "Category: {}", self.category)?;
        write!(f, "Issued: {}", if self.issued { "Yes" } else { "No" })
    }
}
