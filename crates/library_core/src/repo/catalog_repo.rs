//! Catalog store: every book known to the library.
//!
//! # Responsibility
//! - Own the id → book mapping and its text resource.
//! - Provide search and sorted read views.
//!
//! # Invariants
//! - `add` overwrites an existing book with the same id.
//! - Issue-state guards belong to the service; the store flips flags
//!   unconditionally.

use super::{load_records, LoadReport};
use crate::codec::{decode_book, encode_book, encode_lines};
use crate::model::book::{Book, BookId};
use crate::storage::{StorageError, StorageResult, TextResource};
use regex::{Regex, RegexBuilder};
use std::collections::btree_map::Values;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Field used to order [`CatalogStore::sorted_view`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
}

impl SortKey {
    fn field(self, book: &Book) -> &str {
        match self {
            Self::Title => &book.title,
            Self::Author => &book.author,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSortKey(pub String);

impl Display for UnknownSortKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown sort key `{}`; expected title|author", self.0)
    }
}

impl Error for UnknownSortKey {}

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            _ => Err(UnknownSortKey(value.to_string())),
        }
    }
}

/// Case-insensitive literal matcher for catalog search.
#[derive(Debug, Clone)]
struct TextMatcher(Regex);

impl TextMatcher {
    fn new(query: &str) -> Result<Self, regex::Error> {
        RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
            .map(Self)
    }

    fn matches_book(&self, book: &Book) -> bool {
        self.0.is_match(&book.title)
            || self.0.is_match(&book.author)
            || self.0.is_match(&book.category)
    }
}

/// Lazy search results in catalog order.
///
/// Cloning restarts from the current position; calling
/// [`CatalogStore::search`] again restarts from the beginning.
#[derive(Debug, Clone)]
pub struct BookMatches<'a> {
    books: Values<'a, BookId, Book>,
    matcher: TextMatcher,
}

impl<'a> Iterator for BookMatches<'a> {
    type Item = &'a Book;

    fn next(&mut self) -> Option<Self::Item> {
        let matcher = &self.matcher;
        self.books.by_ref().find(|book| matcher.matches_book(book))
    }
}

/// Book mapping backed by a text resource.
#[derive(Debug)]
pub struct CatalogStore<R: TextResource> {
    books: BTreeMap<BookId, Book>,
    resource: R,
    read_failed: bool,
}

impl<R: TextResource> CatalogStore<R> {
    /// Creates an empty store; call [`Self::load`] to read the resource.
    pub fn new(resource: R) -> Self {
        Self {
            books: BTreeMap::new(),
            resource,
            read_failed: false,
        }
    }

    /// Replaces the mapping with the resource contents.
    ///
    /// Malformed lines are skipped; a repeated id keeps the later line.
    pub fn load(&mut self) -> LoadReport {
        let (books, mut report) = load_records(&mut self.resource, "catalog", decode_book);
        self.books = books.into_iter().map(|book| (book.id, book)).collect();
        self.read_failed = report.read_failed;
        report.loaded = self.books.len();
        report
    }

    /// Writes every book, one line each, in id order.
    ///
    /// Refused with `UnreadResource` while the last load failed to read the
    /// resource.
    pub fn save(&mut self) -> StorageResult<()> {
        if self.read_failed {
            return Err(StorageError::UnreadResource(self.resource.label()));
        }
        let text = encode_lines(self.books.values(), encode_book);
        self.resource.write_all(&text)
    }

    /// Inserts a book that is not on loan.
    ///
    /// Returns the book previously stored under `id`, if any.
    pub fn add(
        &mut self,
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        category: impl Into<String>,
    ) -> Option<Book> {
        self.books.insert(id, Book::new(id, title, author, category))
    }

    /// Sets the issued flag. Returns `false` when the book is unknown.
    pub fn mark_issued(&mut self, id: BookId) -> bool {
        match self.books.get_mut(&id) {
            Some(book) => {
                book.mark_issued();
                true
            }
            None => false,
        }
    }

    /// Clears the issued flag. Returns `false` when the book is unknown.
    pub fn mark_returned(&mut self, id: BookId) -> bool {
        match self.books.get_mut(&id) {
            Some(book) => {
                book.mark_returned();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.get(&id)
    }

    pub fn contains(&self, id: BookId) -> bool {
        self.books.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> + '_ {
        self.books.values()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Books whose title, author or category contains `query`, ignoring
    /// case. An empty query matches every book.
    ///
    /// # Errors
    /// Returns the regex error when the escaped query exceeds the compiled
    /// pattern size limit.
    pub fn search(&self, query: &str) -> Result<BookMatches<'_>, regex::Error> {
        Ok(BookMatches {
            books: self.books.values(),
            matcher: TextMatcher::new(query)?,
        })
    }

    /// All books ordered by `key`, ignoring case; equal keys keep id order.
    pub fn sorted_view(&self, key: SortKey) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.values().collect();
        books.sort_by_cached_key(|book| key.field(book).to_lowercase());
        books
    }
}

#[cfg(test)]
mod tests {
    use super::{CatalogStore, SortKey};
    use crate::storage::{MemoryResource, StorageError};

    fn store_with(lines: &str) -> CatalogStore<MemoryResource> {
        let mut store = CatalogStore::new(MemoryResource::with_contents("books", lines));
        store.load();
        store
    }

    #[test]
    fn sort_key_parses_case_insensitively() {
        assert_eq!("Title".parse::<SortKey>().unwrap(), SortKey::Title);
        assert_eq!(" author ".parse::<SortKey>().unwrap(), SortKey::Author);
        assert!("isbn".parse::<SortKey>().is_err());
    }

    #[test]
    fn add_overwrites_same_id() {
        let mut store = CatalogStore::new(MemoryResource::new("books"));
        assert!(store.add(1, "First", "A", "C").is_none());
        store.mark_issued(1);

        let previous = store.add(1, "Second", "B", "D").unwrap();
        assert_eq!(previous.title, "First");
        let current = store.get(1).unwrap();
        assert_eq!(current.title, "Second");
        assert!(!current.issued);
    }

    #[test]
    fn mark_unknown_book_reports_false() {
        let mut store = CatalogStore::new(MemoryResource::new("books"));
        assert!(!store.mark_issued(9));
        assert!(!store.mark_returned(9));
    }

    #[test]
    fn search_matches_author_and_category() {
        let store = store_with("1,Dune,Frank Herbert,Fiction,false\n2,Cosmos,Carl Sagan,Science,false\n");

        let by_author: Vec<i32> = store.search("SAGAN").unwrap().map(|book| book.id).collect();
        assert_eq!(by_author, vec![2]);
        let by_category: Vec<i32> = store.search("fict").unwrap().map(|book| book.id).collect();
        assert_eq!(by_category, vec![1]);
    }

    #[test]
    fn search_treats_query_literally() {
        let store = store_with("1,C++ Primer,Lippman,Programming,false\n2,C Primer,Prata,Programming,false\n");
        let ids: Vec<i32> = store.search("c++").unwrap().map(|book| book.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn search_folds_non_ascii_case() {
        let store = store_with("1,Émile,Rousseau,Philosophy,false\n2,Emma,Austen,Fiction,false\n");
        let ids: Vec<i32> = store.search("éMILE").unwrap().map(|book| book.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn search_is_restartable() {
        let store = store_with("1,Dune,Herbert,Fiction,false\n2,Emma,Austen,Fiction,false\n");
        let matches = store.search("fiction").unwrap();
        assert_eq!(matches.clone().count(), 2);
        assert_eq!(matches.count(), 2);
        assert_eq!(store.search("").unwrap().count(), 2);
    }

    #[test]
    fn sorted_view_by_author_leaves_mapping_order() {
        let store = store_with("1,X,zola,C,false\n2,Y,Austen,C,false\n3,Z,balzac,C,false\n");

        let authors: Vec<&str> = store
            .sorted_view(SortKey::Author)
            .into_iter()
            .map(|book| book.author.as_str())
            .collect();
        assert_eq!(authors, vec!["Austen", "balzac", "zola"]);

        let ids: Vec<i32> = store.iter().map(|book| book.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn repeated_id_keeps_later_line() {
        let store = store_with("4,Old,A,C,false\n4,New,A,C,true\n");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(4).unwrap().title, "New");
    }

    #[test]
    fn failed_read_blocks_save_until_clean_load() {
        let handle = MemoryResource::with_contents("books", "1,Dune,Herbert,Fiction,false\n");
        handle.set_fail_reads(true);
        let mut store = CatalogStore::new(handle.clone());

        let report = store.load();
        assert!(report.read_failed);
        assert!(store.is_empty());

        handle.set_fail_reads(false);
        store.add(2, "Emma", "Austen", "Fiction");
        let err = store.save().unwrap_err();
        assert!(matches!(err, StorageError::UnreadResource(_)));
        assert_eq!(handle.contents(), "1,Dune,Herbert,Fiction,false\n");

        assert!(store.load().is_clean());
        assert!(store.contains(1));
        store.save().unwrap();
    }
}
