use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A key-value store with one JSON document per named slot. This is the
/// seam between the store and whatever actually holds the bytes.
pub trait StorageBackend {
    /// Read the raw contents of a slot. `None` means the slot was never
    /// written.
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot with the given contents.
    fn write(&mut self, slot: &str, contents: &str) -> Result<(), StorageError>;
}

/// File-backed storage: each slot lives in `<dir>/<slot>.json`.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{slot}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(slot)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<(), StorageError> {
        fs::write(self.slot_path(slot), contents)?;
        Ok(())
    }
}

/// In-memory storage for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn write(&mut self, slot: &str, contents: &str) -> Result<(), StorageError> {
        self.slots.insert(slot.to_string(), contents.to_string());
        Ok(())
    }
}
