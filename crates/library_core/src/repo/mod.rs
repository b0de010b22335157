//! In-memory stores synchronized with text resources.
//!
//! # Responsibility
//! - Own the book and member mappings keyed by identifier.
//! - Load and save each mapping through the line codec.
//!
//! # Invariants
//! - Mappings iterate in ascending identifier order, so saved files are
//!   stable across runs.
//! - Loading never fails: malformed lines are logged and skipped, and an
//!   unreadable resource yields an empty mapping.
//! - Stores never persist on their own; the service decides when to save.
//! - A store whose resource could not be read refuses to save until a later
//!   load succeeds, so unread data is never overwritten.

use crate::codec::{decode_lines, ParseError, ParseErrorKind};
use crate::storage::TextResource;
use log::{error, info, warn};
use std::time::Instant;

pub mod catalog_repo;
pub mod roster_repo;

/// Summary of one store load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records present in the mapping after load.
    pub loaded: usize,
    /// Lines rejected by the codec.
    pub skipped: Vec<ParseError>,
    /// The resource itself could not be read.
    pub read_failed: bool,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && !self.read_failed
    }
}

/// Reads and decodes every record of `resource`.
///
/// Emits one `line_skipped` warning per rejected line and a single
/// `<store>_load` summary event.
fn load_records<R, T, F>(resource: &mut R, store: &'static str, decode: F) -> (Vec<T>, LoadReport)
where
    R: TextResource,
    F: Fn(&str) -> Result<T, ParseErrorKind>,
{
    let started_at = Instant::now();
    let text = match resource.read_all() {
        Ok(text) => text,
        Err(err) => {
            error!(
                "event={store}_load module=repo status=error resource={} duration_ms={} error={}",
                resource.label(),
                started_at.elapsed().as_millis(),
                err
            );
            let report = LoadReport {
                read_failed: true,
                ..LoadReport::default()
            };
            return (Vec::new(), report);
        }
    };

    let decoded = decode_lines(&text, decode);
    for skipped in &decoded.errors {
        warn!(
            "event=line_skipped module=repo store={store} resource={} line={} reason={}",
            resource.label(),
            skipped.line,
            skipped.kind
        );
    }

    info!(
        "event={store}_load module=repo status=ok resource={} records={} skipped={} duration_ms={}",
        resource.label(),
        decoded.records.len(),
        decoded.errors.len(),
        started_at.elapsed().as_millis()
    );

    let report = LoadReport {
        loaded: 0,
        skipped: decoded.errors,
        read_failed: false,
    };
    (decoded.records, report)
}
