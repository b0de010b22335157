//! Book line layout: `id,title,author,category,issuedFlag`.

use super::{parse_id, ParseErrorKind, FIELD_DELIMITER};
use crate::model::book::Book;

const BOOK_FIELDS: [&str; 5] = ["id", "title", "author", "category", "issued"];

pub fn encode_book(book: &Book) -> String {
    format!(
        "{}{d}{}{d}{}{d}{}{d}{}",
        book.id,
        book.title,
        book.author,
        book.category,
        book.issued,
        d = FIELD_DELIMITER
    )
}

/// Decodes one book line.
///
/// The issued flag is `true` only for the text `true` (ASCII case ignored);
/// anything else reads as not issued.
pub fn decode_book(line: &str) -> Result<Book, ParseErrorKind> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    match fields.as_slice() {
        [id, title, author, category, issued] => {
            let mut book = Book::new(parse_id(id)?, *title, *author, *category);
            book.issued = issued.eq_ignore_ascii_case("true");
            Ok(book)
        }
        [id, ..] if fields.len() < BOOK_FIELDS.len() => {
            parse_id(id)?;
            Err(ParseErrorKind::MissingField(BOOK_FIELDS[fields.len()]))
        }
        _ => Err(ParseErrorKind::TooManyFields {
            expected: BOOK_FIELDS.len(),
            found: fields.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_book, encode_book};
    use crate::codec::ParseErrorKind;
    use crate::model::book::Book;

    #[test]
    fn encodes_flag_as_literal_text() {
        let mut book = Book::new(12, "Biology 101", "Campbell", "Science");
        assert_eq!(encode_book(&book), "12,Biology 101,Campbell,Science,false");
        book.mark_issued();
        assert_eq!(encode_book(&book), "12,Biology 101,Campbell,Science,true");
    }

    #[test]
    fn decodes_flag_ignoring_case_and_defaults_to_false() {
        assert!(decode_book("1,T,A,C,TRUE").unwrap().issued);
        assert!(!decode_book("1,T,A,C,yes").unwrap().issued);
    }

    #[test]
    fn keeps_empty_text_fields() {
        let book = decode_book("5,Untitled,,,false").unwrap();
        assert_eq!(book.author, "");
        assert_eq!(book.category, "");
    }

    #[test]
    fn rejects_non_numeric_id() {
        let err = decode_book("abc,T,A,C,false").unwrap_err();
        assert_eq!(err, ParseErrorKind::InvalidId("abc".to_string()));
    }

    #[test]
    fn rejects_short_line_naming_first_missing_field() {
        let err = decode_book("7,Only Title").unwrap_err();
        assert_eq!(err, ParseErrorKind::MissingField("author"));
    }

    #[test]
    fn rejects_embedded_delimiter() {
        let err = decode_book("7,Gödel, Escher, Bach,Hofstadter,Math,false").unwrap_err();
        assert_eq!(
            err,
            ParseErrorKind::TooManyFields {
                expected: 5,
                found: 7
            }
        );
    }
}
