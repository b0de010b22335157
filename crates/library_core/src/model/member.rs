//! Member record.
//!
//! # Responsibility
//! - Hold contact fields and the ordered list of books a member has out.
//!
//! # Invariants
//! - `issued_books` keeps issue order and may contain duplicates; callers
//!   decide whether a repeated issue is legal.

use super::book::BookId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Roster identifier for a member.
pub type MemberId = i32;

/// One library member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub issued_books: Vec<BookId>,
}

impl Member {
    /// Creates a member holding no books.
    pub fn new(id: MemberId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            issued_books: Vec::new(),
        }
    }

    /// Appends a book id; repeated ids are kept.
    pub fn attach_book(&mut self, book_id: BookId) {
        self.issued_books.push(book_id);
    }

    /// Removes the first occurrence of `book_id`.
    ///
    /// Returns `false` when the member did not hold the book.
    pub fn detach_book(&mut self, book_id: BookId) -> bool {
        match self.issued_books.iter().position(|held| *held == book_id) {
            Some(index) => {
                self.issued_books.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn holds(&self, book_id: BookId) -> bool {
        self.issued_books.contains(&book_id)
    }
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Member ID: {}", self.id)?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Email: {}", self.email)?;
        write!(f, "Issued Books: {:?}", self.issued_books)
    }
}
