//! Language registry: single source of truth for the supported language set.
//!
//! The site ships four languages. German is both the default language (chosen
//! when detection finds nothing better) and the fallback language (consulted
//! when the active dictionary lacks a key); the two roles are designated
//! separately so they could diverge. The registry uses a singleton behind
//! `OnceLock` for thread-safe initialization and access.

use std::sync::OnceLock;

/// Configuration for a supported language.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// Language code as used in URLs, storage, and dictionary file names.
    /// Mostly ISO 639-1; `ch` is the site's own code for Swiss German.
    pub code: &'static str,

    /// English name of the language (e.g., "German", "Swiss German")
    pub name: &'static str,

    /// Native name of the language (e.g., "Deutsch", "Schwiizerdütsch")
    pub native_name: &'static str,

    /// Whether this is the default language (only one should be true)
    pub is_default: bool,

    /// Whether this is the fallback language for resolution (only one should be true)
    pub is_fallback: bool,

    /// Whether this language is enabled for use
    pub enabled: bool,
}

/// Global language registry singleton.
///
/// Contains all supported languages and provides methods to query them.
/// Initialized once on first access and immutable thereafter.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageConfig)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Get all enabled languages, in registry (display) order.
    pub fn list_enabled(&self) -> Vec<&LanguageConfig> {
        self.languages.iter().filter(|lang| lang.enabled).collect()
    }

    /// Get the default language configuration.
    ///
    /// # Panics
    /// Panics if no default language is found or if multiple default
    /// languages are defined (this indicates a configuration error).
    pub fn default_language(&self) -> &LanguageConfig {
        self.exactly_one(|lang| lang.is_default, "default")
    }

    /// Get the fallback language configuration.
    ///
    /// The fallback dictionary should contain every key used anywhere on the
    /// page; resolution falls through to it when the active language misses.
    ///
    /// # Panics
    /// Panics if no fallback language is found or if multiple fallback
    /// languages are defined.
    pub fn fallback_language(&self) -> &LanguageConfig {
        self.exactly_one(|lang| lang.is_fallback, "fallback")
    }

    /// Check if a language code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|lang| lang.enabled)
            .unwrap_or(false)
    }

    fn exactly_one<F: Fn(&&LanguageConfig) -> bool>(
        &self,
        predicate: F,
        role: &str,
    ) -> &LanguageConfig {
        let matches: Vec<_> = self.languages.iter().filter(|l| predicate(l)).collect();
        match matches.len() {
            0 => panic!("No {} language found in registry", role),
            1 => matches[0],
            _ => panic!("Multiple {} languages found in registry", role),
        }
    }
}

/// The site's language set: German (default and fallback), English, French,
/// and Swiss German.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "de",
            name: "German",
            native_name: "Deutsch",
            is_default: true,
            is_fallback: true,
            enabled: true,
        },
        LanguageConfig {
            code: "en",
            name: "English",
            native_name: "English",
            is_default: false,
            is_fallback: false,
            enabled: true,
        },
        LanguageConfig {
            code: "fr",
            name: "French",
            native_name: "Français",
            is_default: false,
            is_fallback: false,
            enabled: true,
        },
        LanguageConfig {
            code: "ch",
            name: "Swiss German",
            native_name: "Schwiizerdütsch",
            is_default: false,
            is_fallback: false,
            enabled: true,
        },
    ]
}
