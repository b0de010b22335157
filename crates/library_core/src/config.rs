//! Runtime configuration for the library service.
//!
//! # Responsibility
//! - Locate the catalog and roster resources.
//! - Select how strictly returns are checked.

use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default catalog file name inside a data directory.
pub const BOOKS_FILE_NAME: &str = "books.txt";
/// Default roster file name inside a data directory.
pub const MEMBERS_FILE_NAME: &str = "members.txt";

/// How `return_book` treats a member who does not hold the book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReturnPolicy {
    /// Clear the flag and detach regardless of who holds the book.
    #[default]
    Lenient,
    /// Reject the return unless the member's issued list holds the book.
    Strict,
}

impl FromStr for ReturnPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!(
                "unsupported return policy `{other}`; expected lenient|strict"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub books_path: PathBuf,
    pub members_path: PathBuf,
    pub return_policy: ReturnPolicy,
}

impl LibraryConfig {
    /// Uses `books.txt` and `members.txt` inside `dir` with lenient returns.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            books_path: dir.join(BOOKS_FILE_NAME),
            members_path: dir.join(MEMBERS_FILE_NAME),
            return_policy: ReturnPolicy::default(),
        }
    }

    pub fn with_return_policy(mut self, policy: ReturnPolicy) -> Self {
        self.return_policy = policy;
        self
    }
}
