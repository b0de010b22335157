//! Library operation facade.
//!
//! # Responsibility
//! - Expose add/issue/return/search/sort over both stores.
//! - Keep book issued flags and member issued lists in step.
//!
//! # Invariants
//! - Every validation runs before any mutation, so a rejected call leaves
//!   both stores unchanged.
//! - A successful mutation rewrites both resources before returning.
//! - Loading never surfaces codec errors to the caller.

use crate::codec::is_storable_text;
use crate::config::{LibraryConfig, ReturnPolicy};
use crate::model::book::{Book, BookId};
use crate::model::member::{Member, MemberId};
use crate::repo::catalog_repo::{BookMatches, CatalogStore, SortKey};
use crate::repo::roster_repo::RosterStore;
use crate::repo::LoadReport;
use crate::storage::{FileResource, StorageError, TextResource};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type LibraryResult<T> = Result<T, LibraryError>;

/// Failure of a library operation.
#[derive(Debug)]
pub enum LibraryError {
    BookNotFound(BookId),
    MemberNotFound(MemberId),
    /// The book is already on loan.
    AlreadyIssued(BookId),
    /// Strict returns only: the member does not hold the book.
    NotOnLoanToMember {
        book_id: BookId,
        member_id: MemberId,
    },
    /// A text field would break the line format.
    InvalidField {
        field: &'static str,
        value: String,
    },
    /// The search query could not be compiled into a matcher.
    InvalidQuery(regex::Error),
    Storage(StorageError),
}

impl LibraryError {
    /// Returns whether the error names an unknown book or member.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BookNotFound(_) | Self::MemberNotFound(_))
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookNotFound(id) => write!(f, "book not found: {id}"),
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::AlreadyIssued(id) => write!(f, "book already issued: {id}"),
            Self::NotOnLoanToMember { book_id, member_id } => {
                write!(f, "book {book_id} is not on loan to member {member_id}")
            }
            Self::InvalidField { field, value } => write!(
                f,
                "invalid {field} `{}`: commas and line breaks are not allowed",
                value.escape_debug()
            ),
            Self::InvalidQuery(err) => write!(f, "invalid search query: {err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LibraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::InvalidQuery(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for LibraryError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Load summaries for both stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryLoad {
    pub books: LoadReport,
    pub members: LoadReport,
}

/// Facade owning the catalog and roster stores.
///
/// When a resource fails to load, every later persist reports
/// `Storage(UnreadResource)` for it until `load_all` succeeds again.
#[derive(Debug)]
pub struct LibraryService<R: TextResource> {
    catalog: CatalogStore<R>,
    roster: RosterStore<R>,
    return_policy: ReturnPolicy,
}

impl LibraryService<FileResource> {
    /// Builds a file-backed service. Call [`Self::load_all`] before use.
    pub fn from_config(config: &LibraryConfig) -> Self {
        Self::new(
            FileResource::new(&config.books_path),
            FileResource::new(&config.members_path),
            config.return_policy,
        )
    }
}

impl<R: TextResource> LibraryService<R> {
    pub fn new(books: R, members: R, return_policy: ReturnPolicy) -> Self {
        Self {
            catalog: CatalogStore::new(books),
            roster: RosterStore::new(members),
            return_policy,
        }
    }

    pub fn return_policy(&self) -> ReturnPolicy {
        self.return_policy
    }

    /// Loads both stores, replacing in-memory state.
    ///
    /// Malformed lines and unreadable resources are logged and reported in
    /// the returned summary, never as an error.
    pub fn load_all(&mut self) -> LibraryLoad {
        let load = LibraryLoad {
            books: self.catalog.load(),
            members: self.roster.load(),
        };
        info!(
            "event=library_load module=service status={} books={} members={}",
            if load.books.is_clean() && load.members.is_clean() {
                "ok"
            } else {
                "partial"
            },
            load.books.loaded,
            load.members.loaded
        );
        load
    }

    /// Writes both stores. Both writes are attempted; the first failure is
    /// returned.
    pub fn save_all(&mut self) -> LibraryResult<()> {
        let books = self.catalog.save();
        let members = self.roster.save();
        books?;
        members?;
        Ok(())
    }

    /// Adds or replaces a book, then persists.
    pub fn add_book(
        &mut self,
        id: BookId,
        title: &str,
        author: &str,
        category: &str,
    ) -> LibraryResult<()> {
        ensure_storable("title", title)?;
        ensure_storable("author", author)?;
        ensure_storable("category", category)?;

        let replaced = self.catalog.add(id, title, author, category).is_some();
        info!("event=book_add module=service status=ok book_id={id} replaced={replaced}");
        self.save_all()
    }

    /// Adds or replaces a member, then persists.
    pub fn add_member(&mut self, id: MemberId, name: &str, email: &str) -> LibraryResult<()> {
        ensure_storable("name", name)?;
        ensure_storable("email", email)?;

        let replaced = self.roster.add(id, name, email).is_some();
        info!("event=member_add module=service status=ok member_id={id} replaced={replaced}");
        self.save_all()
    }

    /// Lends `book_id` to `member_id`.
    ///
    /// # Errors
    /// - `BookNotFound` / `MemberNotFound` for unknown ids (book checked first).
    /// - `AlreadyIssued` when the book is on loan.
    /// - `Storage` when persisting fails; the loan stays applied in memory.
    pub fn issue_book(&mut self, book_id: BookId, member_id: MemberId) -> LibraryResult<()> {
        let book = self
            .catalog
            .get(book_id)
            .ok_or(LibraryError::BookNotFound(book_id))?;
        if !self.roster.contains(member_id) {
            return Err(LibraryError::MemberNotFound(member_id));
        }
        if book.issued {
            warn!(
                "event=book_issue module=service status=rejected reason=already_issued book_id={book_id} member_id={member_id}"
            );
            return Err(LibraryError::AlreadyIssued(book_id));
        }

        self.catalog.mark_issued(book_id);
        self.roster.attach_book(member_id, book_id);
        info!("event=book_issue module=service status=ok book_id={book_id} member_id={member_id}");
        self.save_all()
    }

    /// Takes `book_id` back from `member_id`.
    ///
    /// Under [`ReturnPolicy::Lenient`] the flag is cleared and the member's
    /// first matching entry removed even when the member never held the
    /// book. Under [`ReturnPolicy::Strict`] that case is rejected.
    pub fn return_book(&mut self, book_id: BookId, member_id: MemberId) -> LibraryResult<()> {
        if !self.catalog.contains(book_id) {
            return Err(LibraryError::BookNotFound(book_id));
        }
        let member = self
            .roster
            .get(member_id)
            .ok_or(LibraryError::MemberNotFound(member_id))?;
        let held = member.holds(book_id);
        if !held && self.return_policy == ReturnPolicy::Strict {
            warn!(
                "event=book_return module=service status=rejected reason=not_on_loan book_id={book_id} member_id={member_id}"
            );
            return Err(LibraryError::NotOnLoanToMember { book_id, member_id });
        }

        self.catalog.mark_returned(book_id);
        self.roster.detach_book(member_id, book_id);
        info!(
            "event=book_return module=service status=ok book_id={book_id} member_id={member_id} held={held}"
        );
        self.save_all()
    }

    /// Case-insensitive search over title, author and category.
    pub fn search(&self, query: &str) -> LibraryResult<BookMatches<'_>> {
        self.catalog.search(query).map_err(LibraryError::InvalidQuery)
    }

    /// Every book ordered by `key`; does not reorder storage.
    pub fn sorted_view(&self, key: SortKey) -> Vec<&Book> {
        self.catalog.sorted_view(key)
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.catalog.get(id)
    }

    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.roster.get(id)
    }

    pub fn books(&self) -> impl Iterator<Item = &Book> + '_ {
        self.catalog.iter()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> + '_ {
        self.roster.iter()
    }
}

fn ensure_storable(field: &'static str, value: &str) -> LibraryResult<()> {
    if is_storable_text(value) {
        Ok(())
    } else {
        Err(LibraryError::InvalidField {
            field,
            value: value.to_string(),
        })
    }
}
