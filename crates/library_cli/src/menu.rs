//! Interactive menu over stdin/stdout.
//!
//! Reads one answer per line. End of input behaves like choosing Exit.

use crate::render::write_books;
use library_core::{LibraryService, SortKey, TextResource};
use std::io::{self, BufRead, Write};

const MENU: &str = "\
Welcome to City Library Digital Management System
1. Add Book
2. Add Member
3. Issue Book
4. Return Book
5. Search Books
6. Sort Books
7. Exit";

struct Prompter<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Prompter<I, O> {
    /// Prints `prompt` and reads one line; `None` on end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    /// Like [`Self::ask`] but re-prompts until the answer is an integer.
    fn ask_number(&mut self, prompt: &str) -> io::Result<Option<i32>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match answer.trim().parse::<i32>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a whole number.")?,
            }
        }
    }

    fn say(&mut self, message: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }
}

/// Runs the menu until Exit or end of input, then saves both stores.
pub fn run<R: TextResource>(
    library: &mut LibraryService<R>,
    input: impl BufRead,
    output: impl Write,
) -> io::Result<()> {
    let mut prompter = Prompter { input, output };

    loop {
        prompter.say(format_args!("\n{MENU}"))?;
        let Some(choice) = prompter.ask_number("Enter your choice: ")? else {
            break;
        };
        let keep_going = match choice {
            1 => add_book(library, &mut prompter)?,
            2 => add_member(library, &mut prompter)?,
            3 => loan(library, &mut prompter, true)?,
            4 => loan(library, &mut prompter, false)?,
            5 => search(library, &mut prompter)?,
            6 => sort(library, &mut prompter)?,
            7 => break,
            _ => {
                prompter.say("Invalid choice.")?;
                true
            }
        };
        if !keep_going {
            break;
        }
    }

    if let Err(err) = library.save_all() {
        prompter.say(format_args!("Error saving library: {err}"))?;
    }
    prompter.say("Exiting...")
}

// Each action returns `Ok(false)` when input ended mid-prompt.

fn add_book<R: TextResource, I: BufRead, O: Write>(
    library: &mut LibraryService<R>,
    prompter: &mut Prompter<I, O>,
) -> io::Result<bool> {
    let Some(id) = prompter.ask_number("Enter Book ID: ")? else {
        return Ok(false);
    };
    let Some(title) = prompter.ask("Enter Title: ")? else {
        return Ok(false);
    };
    let Some(author) = prompter.ask("Enter Author: ")? else {
        return Ok(false);
    };
    let Some(category) = prompter.ask("Enter Category: ")? else {
        return Ok(false);
    };
    match library.add_book(id, &title, &author, &category) {
        Ok(()) => prompter.say("Book added successfully.")?,
        Err(err) => prompter.say(err)?,
    }
    Ok(true)
}

fn add_member<R: TextResource, I: BufRead, O: Write>(
    library: &mut LibraryService<R>,
    prompter: &mut Prompter<I, O>,
) -> io::Result<bool> {
    let Some(id) = prompter.ask_number("Enter Member ID: ")? else {
        return Ok(false);
    };
    let Some(name) = prompter.ask("Enter Name: ")? else {
        return Ok(false);
    };
    let Some(email) = prompter.ask("Enter Email: ")? else {
        return Ok(false);
    };
    match library.add_member(id, &name, &email) {
        Ok(()) => prompter.say("Member added successfully.")?,
        Err(err) => prompter.say(err)?,
    }
    Ok(true)
}

fn loan<R: TextResource, I: BufRead, O: Write>(
    library: &mut LibraryService<R>,
    prompter: &mut Prompter<I, O>,
    issue: bool,
) -> io::Result<bool> {
    let Some(book_id) = prompter.ask_number("Enter Book ID: ")? else {
        return Ok(false);
    };
    let Some(member_id) = prompter.ask_number("Enter Member ID: ")? else {
        return Ok(false);
    };
    let (result, done) = if issue {
        (library.issue_book(book_id, member_id), "Book issued.")
    } else {
        (library.return_book(book_id, member_id), "Book returned.")
    };
    match result {
        Ok(()) => prompter.say(done)?,
        Err(err) => prompter.say(err)?,
    }
    Ok(true)
}

fn search<R: TextResource, I: BufRead, O: Write>(
    library: &LibraryService<R>,
    prompter: &mut Prompter<I, O>,
) -> io::Result<bool> {
    let Some(query) = prompter.ask("Search by title/author/category: ")? else {
        return Ok(false);
    };
    match library.search(query.trim()) {
        Ok(matches) => write_books(&mut prompter.output, matches, false)?,
        Err(err) => prompter.say(err)?,
    }
    Ok(true)
}

fn sort<R: TextResource, I: BufRead, O: Write>(
    library: &LibraryService<R>,
    prompter: &mut Prompter<I, O>,
) -> io::Result<bool> {
    prompter.say("1. Sort by Title\n2. Sort by Author")?;
    let Some(choice) = prompter.ask_number("Enter your choice: ")? else {
        return Ok(false);
    };
    let key = if choice == 1 {
        SortKey::Title
    } else {
        SortKey::Author
    };
    write_books(&mut prompter.output, library.sorted_view(key), false)?;
    Ok(true)
}
