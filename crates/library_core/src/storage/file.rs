//! File-backed text resource.
//!
//! # Invariants
//! - Writes go to a sibling temp file that is synced and then renamed over
//!   the target; the temp file is removed when any step fails.
//! - File handles never outlive a single read or write call.
//! - Bytes that are not valid UTF-8 read as U+FFFD; they never fail the
//!   whole read.

use super::{StorageError, StorageResult, TextResource};
use log::{error, info, warn};
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct FileResource {
    path: PathBuf,
}

impl FileResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create_empty(&self) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StorageError::io(self.label(), err))?;
            }
        }
        File::create(&self.path).map_err(|err| StorageError::io(self.label(), err))?;
        info!(
            "event=resource_create module=storage status=ok path={}",
            self.path.display()
        );
        Ok(())
    }

    fn write_via_temp(&self, tmp_path: &Path, text: &str) -> StorageResult<()> {
        let file = File::create(tmp_path).map_err(|err| StorageError::io(self.label(), err))?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(text.as_bytes())
            .map_err(|err| StorageError::io(self.label(), err))?;
        let file = writer
            .into_inner()
            .map_err(|err| StorageError::io(self.label(), err.into_error()))?;
        file.sync_all()
            .map_err(|err| StorageError::io(self.label(), err))?;
        Ok(())
    }
}

impl TextResource for FileResource {
    fn read_all(&mut self) -> StorageResult<String> {
        if !self.path.exists() {
            self.create_empty()?;
            return Ok(String::new());
        }
        if !self.path.is_file() {
            return Err(StorageError::NotAFile(self.path.clone()));
        }
        let bytes = fs::read(&self.path).map_err(|err| StorageError::io(self.label(), err))?;
        match String::from_utf8(bytes) {
            Ok(text) => Ok(text),
            Err(err) => {
                let text = String::from_utf8_lossy(err.as_bytes()).into_owned();
                warn!(
                    "event=resource_read module=storage status=lossy path={} invalid_utf8_at={}",
                    self.path.display(),
                    err.utf8_error().valid_up_to()
                );
                Ok(text)
            }
        }
    }

    fn write_all(&mut self, text: &str) -> StorageResult<()> {
        let started_at = Instant::now();
        let tmp_path = tmp_write_path(&self.path);

        if let Err(err) = self.write_via_temp(&tmp_path, text) {
            let _ = fs::remove_file(&tmp_path);
            error!(
                "event=resource_write module=storage status=error path={} duration_ms={} error={}",
                self.path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }

        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            error!(
                "event=resource_write module=storage status=error path={} duration_ms={} error_code=rename_failed error={}",
                self.path.display(),
                started_at.elapsed().as_millis(),
                err
            );
            return Err(StorageError::io(self.label(), err));
        }

        info!(
            "event=resource_write module=storage status=ok path={} bytes={} duration_ms={}",
            self.path.display(),
            text.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn label(&self) -> String {
        self.path.display().to_string()
    }
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".{}.tmp", std::process::id()));
    PathBuf::from(tmp)
}
