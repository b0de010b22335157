//! In-memory text resource for tests and dry runs.

use super::{StorageError, StorageResult, TextResource};
use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;

/// Shared in-memory blob.
///
/// Clones share the same contents, so a caller can keep a handle to inspect
/// what a store wrote.
#[derive(Debug, Clone)]
pub struct MemoryResource {
    name: String,
    contents: Rc<RefCell<String>>,
    fail_reads: Rc<Cell<bool>>,
    fail_writes: Rc<Cell<bool>>,
}

impl MemoryResource {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_contents(name, "")
    }

    pub fn with_contents(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: Rc::new(RefCell::new(contents.into())),
            fail_reads: Rc::new(Cell::new(false)),
            fail_writes: Rc::new(Cell::new(false)),
        }
    }

    pub fn contents(&self) -> String {
        self.contents.borrow().clone()
    }

    /// Makes every later read fail until switched back.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    /// Makes every later write fail until switched back.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl TextResource for MemoryResource {
    fn read_all(&mut self) -> StorageResult<String> {
        if self.fail_reads.get() {
            return Err(StorageError::io(
                self.label(),
                io::Error::other("reads disabled"),
            ));
        }
        Ok(self.contents())
    }

    fn write_all(&mut self, text: &str) -> StorageResult<()> {
        if self.fail_writes.get() {
            return Err(StorageError::io(
                self.label(),
                io::Error::other("writes disabled"),
            ));
        }
        *self.contents.borrow_mut() = text.to_string();
        Ok(())
    }

    fn label(&self) -> String {
        format!("memory:{}", self.name)
    }
}
