//! Persisted string key-value stores backing the report cache.
//!
//! The substrate is shared process-wide state with no transactions: two
//! writers racing on one key end with the last write.

use std::collections::BTreeMap;
use std::fs::{self, create_dir_all, read_dir, remove_file, rename};
use std::path::{Path, PathBuf};

use log::warn;

use super::consts::DEFAULT_ENTRY_EXT;
use super::errors::CacheError;

///
/// A string-keyed, string-valued store with key enumeration.
///
/// Reads are infallible: anything that can't be read is reported as absent.
///
pub trait KeyValueStore {
    /// Every key currently stored, in a stable order.
    fn keys(&self) -> Vec<String>;

    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> Result<(), CacheError>;
}

/// In-memory substrate, ordered by key.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

///
/// Folder-backed substrate: one `<key>.json` file per entry.
///
/// Keys become file names, so only ASCII letters, digits, `_`, `-` and `.`
/// are accepted, and a key may not start with `.`.
///
#[derive(Clone, Debug)]
pub struct FileStore {
    folder: PathBuf,
}

impl FileStore {
    ///
    /// Open (and create if needed) a store in `folder`.
    ///
    /// # Arguments
    /// - folder: directory holding the entry files
    pub fn new(folder: PathBuf) -> Result<Self, CacheError> {
        create_dir_all(&folder)?;
        Ok(FileStore { folder })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        valid_key(key).then(|| self.folder.join(format!("{}.{}", key, DEFAULT_ENTRY_EXT)))
    }
}

fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

impl KeyValueStore for FileStore {
    fn keys(&self) -> Vec<String> {
        let entries = match read_dir(&self.folder) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Can't list cache folder {}: {}", self.folder.display(), e);
                return Vec::new();
            }
        };

        let mut keys: Vec<String> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(DEFAULT_ENTRY_EXT)
            })
            .filter_map(|path| {
                path.file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string)
            })
            .filter(|key| valid_key(key))
            .collect();
        keys.sort();
        keys
    }

    fn get_item(&self, key: &str) -> Option<String> {
        let path = self.entry_path(key)?;
        fs::read_to_string(path).ok()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), CacheError> {
        let path = self
            .entry_path(key)
            .ok_or_else(|| CacheError::InvalidKey(key.to_string()))?;

        // write next to the target, then swap in
        let staging = path.with_extension(format!("{}.tmp", DEFAULT_ENTRY_EXT));
        fs::write(&staging, value)?;
        rename(&staging, &path)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), CacheError> {
        let Some(path) = self.entry_path(key) else {
            return Ok(());
        };
        if path.exists() {
            remove_file(&path)?;
        }
        Ok(())
    }
}
