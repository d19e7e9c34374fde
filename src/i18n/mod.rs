//! Internationalization (i18n) module for multi-language support.
//!
//! This module owns everything language-related: the supported language set,
//! the per-language translation dictionaries, detection of the visitor's
//! starting language, and the engine that resolves keys and applies
//! translations to the page model.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported languages and their metadata
//! - `language`: Type-safe Language type validated against the registry
//! - `dictionary`: Nested key→string translation trees (one per language)
//! - `loader`: Concurrent, failure-tolerant dictionary loading
//! - `detect`: Startup language detection (URL, stored preference, locale)
//! - `engine`: The translation store & resolver passed to collaborators
//!
//! # Example
//!
//! ```rust,ignore
//! use blacklodge_site::i18n::{DictionarySource, I18nEngine, Language};
//!
//! let mut engine = I18nEngine::new(store);
//! engine.initialize(&DictionarySource::Dir("assets/i18n".into()), &mut doc).await;
//! assert_eq!(engine.resolve("hero.title"), "Grüezi");
//! ```

pub mod detect;
mod dictionary;
mod engine;
mod language;
mod loader;
mod registry;

pub use detect::LANG_PARAM;
pub use dictionary::Dictionary;
pub use engine::{I18nEngine, LanguageObserver};
pub use language::Language;
pub use loader::{DictionarySource, LoadError};
pub use registry::{LanguageConfig, LanguageRegistry};
