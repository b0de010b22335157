//! Member line layout: `id,name,email,issuedIds`.
//!
//! `issuedIds` is every held book id followed by `-` (`3-7-`), or empty.
//! A line without the fourth field is a member holding no books.

use super::{parse_id, ParseErrorKind, FIELD_DELIMITER, ISSUED_ID_DELIMITER};
use crate::model::book::BookId;
use crate::model::member::Member;

const MEMBER_FIELDS: [&str; 4] = ["id", "name", "email", "issued_books"];

pub fn encode_member(member: &Member) -> String {
    let mut line = format!(
        "{}{d}{}{d}{}{d}",
        member.id,
        member.name,
        member.email,
        d = FIELD_DELIMITER
    );
    for book_id in &member.issued_books {
        line.push_str(&book_id.to_string());
        line.push(ISSUED_ID_DELIMITER);
    }
    line
}

pub fn decode_member(line: &str) -> Result<Member, ParseErrorKind> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    let (id, name, email, issued) = match fields.as_slice() {
        [id, name, email] => (*id, *name, *email, ""),
        [id, name, email, issued] => (*id, *name, *email, *issued),
        [id, ..] if fields.len() < 3 => {
            parse_id(id)?;
            return Err(ParseErrorKind::MissingField(MEMBER_FIELDS[fields.len()]));
        }
        _ => {
            return Err(ParseErrorKind::TooManyFields {
                expected: MEMBER_FIELDS.len(),
                found: fields.len(),
            })
        }
    };

    let mut member = Member::new(parse_id(id)?, name, email);
    member.issued_books = decode_issued_ids(issued)?;
    Ok(member)
}

fn decode_issued_ids(field: &str) -> Result<Vec<BookId>, ParseErrorKind> {
    let body = field.strip_suffix(ISSUED_ID_DELIMITER).unwrap_or(field);
    if body.is_empty() {
        return Ok(Vec::new());
    }
    body.split(ISSUED_ID_DELIMITER)
        .map(|segment| {
            segment
                .parse::<BookId>()
                .map_err(|_| ParseErrorKind::InvalidIssuedId(segment.to_string()))
        })
        .collect()
}
