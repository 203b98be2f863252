//! Disk persistence for the in-memory workbook.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::workbook::{MemoryWorkbook, WorkbookError};

/// Saved workbook with metadata.
#[derive(Debug, Serialize, Deserialize)]
struct SavedWorkbook {
    /// When the file was written.
    saved_at: DateTime<Utc>,
    workbook: MemoryWorkbook,
}

/// Configuration for the workbook file.
#[derive(Debug, Clone)]
pub struct WorkbookStoreConfig {
    /// Path to the workbook file.
    pub path: PathBuf,
}

impl WorkbookStoreConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for WorkbookStoreConfig {
    fn default() -> Self {
        Self::new("workbook.json")
    }
}

/// Reads and writes a [`MemoryWorkbook`] as JSON.
#[derive(Debug, Clone)]
pub struct WorkbookStore {
    config: WorkbookStoreConfig,
}

impl WorkbookStore {
    pub fn new(config: WorkbookStoreConfig) -> Self {
        Self { config }
    }

    /// Load the workbook.
    ///
    /// Returns `Ok(None)` if the file doesn't exist. A file that exists but
    /// can't be parsed is an error rather than silently replaced.
    pub fn load(&self) -> Result<Option<MemoryWorkbook>, WorkbookError> {
        let contents = match std::fs::read_to_string(&self.config.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(WorkbookError::Storage {
                    message: format!("failed to read workbook file: {}", e),
                });
            }
        };

        let saved: SavedWorkbook =
            serde_json::from_str(&contents).map_err(|e| WorkbookError::Storage {
                message: format!("failed to parse workbook file: {}", e),
            })?;

        Ok(Some(saved.workbook))
    }

    /// Save the workbook.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save(&self, workbook: &MemoryWorkbook) -> Result<(), WorkbookError> {
        let saved = SavedWorkbook {
            saved_at: Utc::now(),
            workbook: workbook.clone(),
        };

        if let Some(parent) = self.config.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| WorkbookError::Storage {
                message: format!("failed to create workbook directory: {}", e),
            })?;
        }

        let json = serde_json::to_string_pretty(&saved).map_err(|e| WorkbookError::Storage {
            message: format!("failed to serialize workbook: {}", e),
        })?;

        std::fs::write(&self.config.path, json).map_err(|e| WorkbookError::Storage {
            message: format!("failed to write workbook file: {}", e),
        })?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{CellRef, Workbook};
    use tempfile::tempdir;

    #[test]
    fn save_and_load() {
        let dir = tempdir().unwrap();
        let store = WorkbookStore::new(WorkbookStoreConfig::new(dir.path().join("wb.json")));

        let mut wb = MemoryWorkbook::new();
        wb.create_sheet("Input").unwrap();
        wb.write_range("Input", CellRef::new(0, 1), &[vec!["Tokyo".to_string()]])
            .unwrap();

        store.save(&wb).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded, wb);
        assert_eq!(
            loaded.read_cell("Input", CellRef::new(0, 1)).unwrap(),
            Some("Tokyo".into())
        );
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = WorkbookStore::new(WorkbookStoreConfig::new(dir.path().join("absent.json")));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("wb.json");
        std::fs::write(&path, "not json").unwrap();

        let store = WorkbookStore::new(WorkbookStoreConfig::new(&path));
        assert!(matches!(
            store.load(),
            Err(WorkbookError::Storage { .. })
        ));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("wb.json");
        let store = WorkbookStore::new(WorkbookStoreConfig::new(&path));

        store.save(&MemoryWorkbook::new()).unwrap();
        assert!(path.exists());
    }
}
