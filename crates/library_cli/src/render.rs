//! Text and JSON rendering for CLI output.

use library_core::{Book, Member};
use std::io::{self, Write};

const SEPARATOR: &str = "----------";

pub fn write_books<'a>(
    out: &mut impl Write,
    books: impl IntoIterator<Item = &'a Book>,
    json: bool,
) -> io::Result<()> {
    if json {
        let books: Vec<&Book> = books.into_iter().collect();
        return write_json(out, &books);
    }

    let mut count = 0usize;
    for book in books {
        writeln!(out, "{book}")?;
        writeln!(out, "{SEPARATOR}")?;
        count += 1;
    }
    if count == 0 {
        writeln!(out, "No books found.")?;
    }
    Ok(())
}

pub fn write_member(out: &mut impl Write, member: &Member, json: bool) -> io::Result<()> {
    if json {
        return write_json(out, member);
    }
    writeln!(out, "{member}")
}

fn write_json<T: serde::Serialize + ?Sized>(out: &mut impl Write, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::from)?;
    writeln!(out)
}
