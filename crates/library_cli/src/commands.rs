//! One-shot subcommand execution.

use crate::cli::Commands;
use crate::render::{write_books, write_member};
use library_core::{LibraryError, LibraryService, TextResource};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, Write};

#[derive(Debug)]
pub enum CommandError {
    Library(LibraryError),
    UnknownMember(i32),
    Output(io::Error),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Library(err) => write!(f, "{err}"),
            Self::UnknownMember(id) => write!(f, "member not found: {id}"),
            Self::Output(err) => write!(f, "failed to write output: {err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Library(err) => Some(err),
            Self::UnknownMember(_) => None,
            Self::Output(err) => Some(err),
        }
    }
}

impl From<LibraryError> for CommandError {
    fn from(value: LibraryError) -> Self {
        Self::Library(value)
    }
}

impl From<io::Error> for CommandError {
    fn from(value: io::Error) -> Self {
        Self::Output(value)
    }
}

pub fn run<R: TextResource>(
    command: Commands,
    library: &mut LibraryService<R>,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match command {
        Commands::AddBook {
            id,
            title,
            author,
            category,
        } => {
            library.add_book(id, &title, &author, &category)?;
            writeln!(out, "Book added successfully.")?;
        }
        Commands::AddMember { id, name, email } => {
            library.add_member(id, &name, &email)?;
            writeln!(out, "Member added successfully.")?;
        }
        Commands::Issue { book_id, member_id } => {
            library.issue_book(book_id, member_id)?;
            writeln!(out, "Book issued.")?;
        }
        Commands::Return { book_id, member_id } => {
            library.return_book(book_id, member_id)?;
            writeln!(out, "Book returned.")?;
        }
        Commands::Search { query, json } => write_books(out, library.search(&query)?, json)?,
        Commands::Sort { key, json } => write_books(out, library.sorted_view(key), json)?,
        Commands::ShowMember { id, json } => {
            let member = library.member(id).ok_or(CommandError::UnknownMember(id))?;
            write_member(out, member, json)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run, CommandError};
    use crate::cli::Commands;
    use library_core::{LibraryError, LibraryService, MemoryResource, ReturnPolicy};

    fn library() -> LibraryService<MemoryResource> {
        LibraryService::new(
            MemoryResource::new("books"),
            MemoryResource::new("members"),
            ReturnPolicy::Lenient,
        )
    }

    #[test]
    fn issue_of_unknown_book_surfaces_library_error() {
        let mut library = library();
        let mut out = Vec::new();
        let err = run(
            Commands::Issue {
                book_id: 1,
                member_id: 1,
            },
            &mut library,
            &mut out,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CommandError::Library(LibraryError::BookNotFound(1))
        ));
    }

    #[test]
    fn add_then_search_prints_details() {
        let mut library = library();
        let mut out = Vec::new();
        run(
            Commands::AddBook {
                id: 1,
                title: "Biology 101".to_string(),
                author: "Campbell".to_string(),
                category: "Science".to_string(),
            },
            &mut library,
            &mut out,
        )
        .unwrap();
        run(
            Commands::Search {
                query: "bio".to_string(),
                json: false,
            },
            &mut library,
            &mut out,
        )
        .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Book added successfully.\n"));
        assert!(text.contains("Title: Biology 101"));
    }
}
