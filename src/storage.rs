//! Persistent preference storage: the localStorage analogue.
//!
//! The site stores exactly two values: the chosen language
//! (`blacklodge-language`) and the one-shot Swiss prompt flag
//! (`swiss-modal-seen`). Both live in a small JSON map persisted to disk;
//! tests and the demo server use the in-memory variant.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::warn;

/// Storage key for the active language preference.
pub const LANGUAGE_KEY: &str = "blacklodge-language";

/// Storage key for the "Swiss prompt already shown" flag.
pub const SWISS_MODAL_SEEN_KEY: &str = "swiss-modal-seen";

/// String key/value store for user preferences.
///
/// Implementations take `&self`: the engine and the Swiss prompt share one
/// store handle, and writes happen from accessor-style call sites.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// JSON-file-backed store, write-through on every mutation.
pub struct FilePreferenceStore {
    path: PathBuf,
    values: Mutex<BTreeMap<String, String>>,
}

impl FilePreferenceStore {
    /// Open the store, loading any existing file. A missing file is an empty
    /// store; an unreadable or corrupt file is an error so a broken
    /// preference file is not silently wiped.
    pub fn open(path: &Path) -> Result<Self> {
        let values = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read preference file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Preference file {} is not valid JSON", path.display()))?
        } else {
            BTreeMap::new()
        };

        Ok(FilePreferenceStore {
            path: path.to_path_buf(),
            values: Mutex::new(values),
        })
    }

    fn persist(&self, values: &BTreeMap<String, String>) {
        let serialized = match serde_json::to_string_pretty(values) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize preferences: {}", e);
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, serialized) {
            // A failed write degrades to session-only persistence.
            warn!(
                "Failed to write preference file {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.persist(&values);
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock().unwrap();
        values.remove(key);
        self.persist(&values);
    }
}

/// In-memory store for tests and per-session use.
#[derive(Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}
