//! Language type: flexible, validated language representation.
//!
//! A `Language` can only be constructed for a code that exists in the
//! registry and is enabled, so every `Language` value in the program is
//! guaranteed to be a member of the supported set.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};

/// A validated language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// Language code (e.g., "de", "ch")
    code: &'static str,
}

impl Language {
    /// German (Hochdeutsch), the site's default and fallback language.
    pub const GERMAN: Language = Language { code: "de" };

    /// English.
    pub const ENGLISH: Language = Language { code: "en" };

    /// French.
    pub const FRENCH: Language = Language { code: "fr" };

    /// Swiss German (Schwiizerdütsch).
    pub const SWISS_GERMAN: Language = Language { code: "ch" };

    /// Create a Language from a language code string.
    ///
    /// # Returns
    /// * `Ok(Language)` if the code is valid and the language is enabled
    /// * `Err` if the code is not found or the language is disabled
    pub fn from_code(code: &str) -> Result<Language> {
        let registry = LanguageRegistry::get();

        match registry.get_by_code(code) {
            Some(config) if config.enabled => Ok(Language {
                code: config.code, // Use the static str from the registry
            }),
            Some(_) => bail!("Language '{}' is not enabled", code),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The default language, used when detection finds nothing better and
    /// when an unsupported code must be coerced.
    pub fn default_language() -> Language {
        let config = LanguageRegistry::get().default_language();
        Language { code: config.code }
    }

    /// The fallback language consulted when the active dictionary misses a key.
    pub fn fallback_language() -> Language {
        let config = LanguageRegistry::get().fallback_language();
        Language { code: config.code }
    }

    /// All enabled languages in display order.
    pub fn all() -> Vec<Language> {
        LanguageRegistry::get()
            .list_enabled()
            .into_iter()
            .map(|config| Language { code: config.code })
            .collect()
    }

    /// Get the language code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Code as shown in the language switcher display ("DE", "CH", ...).
    pub fn display_code(&self) -> String {
        self.code.to_uppercase()
    }

    /// Get the full language configuration from the registry.
    ///
    /// # Panics
    /// Panics if the language code is not found in the registry. This should
    /// never happen if the Language was constructed properly (via `from_code`
    /// or constants).
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    /// Get the English name of the language.
    pub fn name(&self) -> &'static str {
        self.config().name
    }

    /// Get the native name of the language.
    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    /// Check if this is the default language.
    pub fn is_default(&self) -> bool {
        self.config().is_default
    }
}
