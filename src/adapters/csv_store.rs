//! CSV data-log storage on the host filesystem.
//!
//! Paths handed to [`LogStorePort`] are resolved relative to a root
//! directory, standing in for the SD card mount point on the board.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use log::{debug, warn};

use crate::app::ports::LogStorePort;
use crate::error::StorageError;

pub struct CsvFileStore {
    root: PathBuf,
}

impl CsvFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, StorageError> {
        if !self.root.is_dir() {
            warn!("CsvFileStore: {} is not a directory", self.root.display());
            return Err(StorageError::NotMounted);
        }
        Ok(self.root.join(path))
    }
}

impl LogStorePort for CsvFileStore {
    fn create(&mut self, path: &str, header: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        fs::write(&full, format!("{header}\n")).map_err(|e| {
            warn!("CsvFileStore: creating {} failed: {e}", full.display());
            StorageError::IoError
        })?;
        debug!("CsvFileStore: created {}", full.display());
        Ok(())
    }

    fn append_line(&mut self, path: &str, line: &str) -> Result<(), StorageError> {
        let full = self.resolve(path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full)
            .map_err(|e| {
                warn!("CsvFileStore: opening {} failed: {e}", full.display());
                StorageError::IoError
            })?;
        writeln!(file, "{line}").map_err(|e| {
            warn!("CsvFileStore: appending to {} failed: {e}", full.display());
            StorageError::IoError
        })
    }
}
