use clap::{Parser, Subcommand};
use library_core::{ReturnPolicy, SortKey};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "library",
    about = "Library ledger: books, members and loans kept in plain text files",
    version
)]
pub struct Cli {
    /// Directory holding books.txt and members.txt
    #[arg(long, env = "LIBRARY_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Directory for rolling log files (default: <data-dir>/logs)
    #[arg(long, env = "LIBRARY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "LIBRARY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Return policy: lenient or strict
    #[arg(long, env = "LIBRARY_RETURN_POLICY", default_value = "lenient")]
    pub return_policy: ReturnPolicy,

    /// Run one operation instead of the interactive menu
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a book, replacing any book with the same id
    AddBook {
        id: i32,
        title: String,
        author: String,
        category: String,
    },

    /// Add a member, replacing any member with the same id
    AddMember { id: i32, name: String, email: String },

    /// Lend a book to a member
    Issue { book_id: i32, member_id: i32 },

    /// Take a book back from a member
    Return { book_id: i32, member_id: i32 },

    /// Find books by title, author or category (case-insensitive)
    Search {
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every book ordered by title or author
    Sort {
        #[arg(default_value = "title")]
        key: SortKey,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one member and the books they hold
    ShowMember {
        id: i32,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
