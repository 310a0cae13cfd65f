// Durable key-value persistence for the tab session.
// Reads that fail degrade to `None`; the caller substitutes its default and
// the next write overwrites with good data, so corruption is self-healing.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key holding the JSON-serialized tab list.
pub const TABS_STORAGE_KEY: &str = "hd-tabs-list";
/// Key holding the active href as a plain string.
pub const ACTIVE_TAB_KEY: &str = "hd-tabs-active";

/// Synchronous origin-scoped key-value store. Implementations must be
/// shareable across threads, but all mutation in this crate happens from a
/// single event context; concurrent writers are last-write-wins by design.
pub trait KvStore: Send + Sync {
    /// Returns the stored value, or `None` when absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), String>;
}

/// File-backed store: one file per key inside a dedicated directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl KvStore for FileStore {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.key_path(key);
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("[Store] Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        let path = self.key_path(key);
        let tmp_path = path.with_extension("tmp");

        fs::create_dir_all(&self.dir).map_err(|e| e.to_string())?;

        // Atomic Write Strategy: Write to tmp, then rename.
        // This ensures we never have a half-written file if the host crashes.
        fs::write(&tmp_path, value).map_err(|e| e.to_string())?;
        fs::rename(tmp_path, path).map_err(|e| e.to_string())?;

        Ok(())
    }
}

/// In-memory store for tests and hosts without durable storage.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) -> Result<(), String> {
        let mut values = self.values.lock().map_err(|e| e.to_string())?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
