//! Line-oriented text codec for the catalog and roster resources.
//!
//! # Responsibility
//! - Map records to one comma-delimited line each and back.
//! - Report malformed lines with their 1-based line number.
//!
//! # Invariants
//! - Encoding is total and never escapes; text fields must not contain the
//!   field delimiter or a line break to round-trip.
//! - Decoding one line never depends on any other line.
//!
//! # See also
//! - `codec::book_line`, `codec::member_line` for the per-record layouts.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod book_line;
pub mod member_line;

pub use book_line::{decode_book, encode_book};
pub use member_line::{decode_member, encode_member};

/// Separator between fields of one record.
pub const FIELD_DELIMITER: char = ',';
/// Separator between book ids inside a member's issued list.
pub const ISSUED_ID_DELIMITER: char = '-';

/// Why a single line could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The record identifier is not an integer.
    InvalidId(String),
    /// The line ended before the named field.
    MissingField(&'static str),
    /// The line has more fields than the layout allows.
    TooManyFields { expected: usize, found: usize },
    /// A segment of the issued-books field is not an integer.
    InvalidIssuedId(String),
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "invalid identifier `{value}`"),
            Self::MissingField(field) => write!(f, "missing field `{field}`"),
            Self::TooManyFields { expected, found } => {
                write!(f, "expected {expected} fields, found {found}")
            }
            Self::InvalidIssuedId(value) => write!(f, "invalid issued book id `{value}`"),
        }
    }
}

/// Malformed persisted line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number inside the resource.
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.kind)
    }
}

impl Error for ParseError {}

/// Outcome of decoding a whole resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedLines<T> {
    /// Well-formed records in file order.
    pub records: Vec<T>,
    /// One entry per rejected line.
    pub errors: Vec<ParseError>,
}

/// Decodes every non-blank line of `text` with `decode`.
///
/// Malformed lines are collected into `errors` and skipped; they never stop
/// the remaining lines from decoding.
pub fn decode_lines<T, F>(text: &str, decode: F) -> DecodedLines<T>
where
    F: Fn(&str) -> Result<T, ParseErrorKind>,
{
    let mut records = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match decode(line) {
            Ok(record) => records.push(record),
            Err(kind) => errors.push(ParseError {
                line: index + 1,
                kind,
            }),
        }
    }

    DecodedLines { records, errors }
}

/// Encodes `records` as newline-terminated lines.
pub fn encode_lines<'a, T: 'a, F>(records: impl IntoIterator<Item = &'a T>, encode: F) -> String
where
    F: Fn(&T) -> String,
{
    let mut text = String::new();
    for record in records {
        text.push_str(&encode(record));
        text.push('\n');
    }
    text
}

/// Returns whether `value` can be stored in a text field without corrupting
/// the line layout.
pub fn is_storable_text(value: &str) -> bool {
    !value.contains([FIELD_DELIMITER, '\n', '\r'])
}

fn parse_id(value: &str) -> Result<i32, ParseErrorKind> {
    value
        .parse::<i32>()
        .map_err(|_| ParseErrorKind::InvalidId(value.to_string()))
}
