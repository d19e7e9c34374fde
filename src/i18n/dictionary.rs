//! Translation dictionary: one nested key→string tree per language.
//!
//! Dictionaries are plain JSON documents: arbitrarily nested objects whose
//! leaves are strings. A reserved top-level `meta` branch carries the page
//! `title` and `description`. Only string leaves are valid translations; a
//! dotted path that lands on a subtree is treated as unresolved.

use serde_json::{json, Value};

/// Value recorded under the `error` key when the fallback dictionary itself
/// fails to load, so total translation failure stays visible.
pub const LOAD_ERROR_VALUE: &str = "Translation error";

/// A single language's translation tree.
#[derive(Debug, Clone)]
pub struct Dictionary {
    root: Value,
}

impl Dictionary {
    /// Empty dictionary; every lookup misses. Used for languages whose
    /// document failed to load.
    pub fn empty() -> Self {
        Dictionary {
            root: Value::Object(serde_json::Map::new()),
        }
    }

    /// Placeholder dictionary recorded when the fallback language fails to
    /// load: a single visible `error` entry instead of silence.
    pub fn load_error_placeholder() -> Self {
        Dictionary {
            root: json!({ "error": LOAD_ERROR_VALUE }),
        }
    }

    /// Build a dictionary from an already-parsed JSON document.
    pub fn from_value(root: Value) -> Self {
        Dictionary { root }
    }

    /// Parse a dictionary from raw JSON text.
    pub fn parse(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Dictionary {
            root: serde_json::from_str(raw)?,
        })
    }

    /// Walk a dot-separated path through the tree.
    ///
    /// Returns `None` when any segment is missing or the current node is not
    /// a traversable mapping. Returns the final value otherwise — which may
    /// itself be a subtree; callers that only accept leaves use [`lookup`].
    ///
    /// [`lookup`]: Dictionary::lookup
    pub fn resolve_path(&self, key: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in key.split('.') {
            match current {
                Value::Object(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Resolve a dotted key to a string leaf, or `None`.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        match self.resolve_path(key)? {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// True when the dictionary has no entries at all.
    pub fn is_empty(&self) -> bool {
        match &self.root {
            Value::Object(map) => map.is_empty(),
            _ => false,
        }
    }
}
