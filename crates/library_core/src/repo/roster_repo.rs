//! Roster store: every library member and the books they hold.
//!
//! # Invariants
//! - `add` overwrites an existing member with the same id and clears the
//!   issued list.
//! - `attach_book` never deduplicates; `detach_book` removes one occurrence.

use super::{load_records, LoadReport};
use crate::codec::{decode_member, encode_lines, encode_member};
use crate::model::book::BookId;
use crate::model::member::{Member, MemberId};
use crate::storage::{StorageError, StorageResult, TextResource};
use std::collections::BTreeMap;

/// Member mapping backed by a text resource.
#[derive(Debug)]
pub struct RosterStore<R: TextResource> {
    members: BTreeMap<MemberId, Member>,
    resource: R,
    read_failed: bool,
}

impl<R: TextResource> RosterStore<R> {
    pub fn new(resource: R) -> Self {
        Self {
            members: BTreeMap::new(),
            resource,
            read_failed: false,
        }
    }

    /// Replaces the mapping with the resource contents.
    pub fn load(&mut self) -> LoadReport {
        let (members, mut report) = load_records(&mut self.resource, "roster", decode_member);
        self.members = members
            .into_iter()
            .map(|member| (member.id, member))
            .collect();
        self.read_failed = report.read_failed;
        report.loaded = self.members.len();
        report
    }

    /// Writes every member in id order; refused while the last load failed
    /// to read the resource.
    pub fn save(&mut self) -> StorageResult<()> {
        if self.read_failed {
            return Err(StorageError::UnreadResource(self.resource.label()));
        }
        let text = encode_lines(self.members.values(), encode_member);
        self.resource.write_all(&text)
    }

    /// Inserts a member holding no books.
    ///
    /// Returns the member previously stored under `id`, if any.
    pub fn add(
        &mut self,
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Option<Member> {
        self.members.insert(id, Member::new(id, name, email))
    }

    /// Appends `book_id` to the member's list. Returns `false` when the
    /// member is unknown.
    pub fn attach_book(&mut self, member_id: MemberId, book_id: BookId) -> bool {
        match self.members.get_mut(&member_id) {
            Some(member) => {
                member.attach_book(book_id);
                true
            }
            None => false,
        }
    }

    /// Removes the first occurrence of `book_id` from the member's list.
    ///
    /// Returns whether an id was removed; unknown members and books the
    /// member does not hold are no-ops.
    pub fn detach_book(&mut self, member_id: MemberId, book_id: BookId) -> bool {
        self.members
            .get_mut(&member_id)
            .is_some_and(|member| member.detach_book(book_id))
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.get(&id)
    }

    pub fn contains(&self, id: MemberId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Member> + '_ {
        self.members.values()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
