use std::path::PathBuf;

use crate::i18n::DictionarySource;

#[derive(Debug, Clone)]
pub struct Config {
    // i18n
    pub i18n_dir: PathBuf,
    pub i18n_base_url: Option<String>,
    pub prefs_file: PathBuf,

    // Server
    pub port: u16,

    // Business
    pub contact_email: String,
    pub contact_phone: String,
    pub instagram_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            // Dictionaries ship with the site; I18N_BASE_URL switches to a
            // remote source when set
            i18n_dir: std::env::var("I18N_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("assets/i18n")),
            i18n_base_url: std::env::var("I18N_BASE_URL").ok().filter(|v| !v.is_empty()),
            prefs_file: std::env::var("PREFS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".blacklodge-prefs.json")),

            // Server
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            // Business
            contact_email: std::env::var("CONTACT_EMAIL")
                .unwrap_or_else(|_| "the.blacklodge@outlook.com".to_string()),
            contact_phone: std::env::var("CONTACT_PHONE")
                .unwrap_or_else(|_| "+41 79 778 48 61".to_string()),
            instagram_url: std::env::var("INSTAGRAM_URL")
                .unwrap_or_else(|_| "https://www.instagram.com/_the.black.lodge_/".to_string()),
        }
    }

    /// Where dictionaries load from: a remote base URL when configured,
    /// otherwise the local directory.
    pub fn dictionary_source(&self) -> DictionarySource {
        match &self.i18n_base_url {
            Some(base) => DictionarySource::BaseUrl(base.clone()),
            None => DictionarySource::Dir(self.i18n_dir.clone()),
        }
    }
}
