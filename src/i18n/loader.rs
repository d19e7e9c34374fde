//! Dictionary loading: one `{code}.json` document per supported language.
//!
//! All languages load concurrently and failures are settled per language: a
//! failed load leaves that language with an empty dictionary (resolution then
//! falls through to the fallback), except for the fallback language itself,
//! which degrades to a visible load-error placeholder. `load_all` never
//! fails — a broken dictionary source must not take the page down.

use std::collections::HashMap;
use std::path::PathBuf;

use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use crate::i18n::{Dictionary, Language};

/// Where dictionary documents come from.
#[derive(Debug, Clone)]
pub enum DictionarySource {
    /// Directory containing `de.json`, `en.json`, ... on disk.
    Dir(PathBuf),
    /// HTTP base URL serving `{base}/{code}.json`.
    BaseUrl(String),
}

/// Why a single language's dictionary failed to load.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("dictionary for '{code}' is not valid JSON: {source}")]
    Parse {
        code: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Load the dictionary document for one language.
async fn load_one(
    source: &DictionarySource,
    client: &reqwest::Client,
    language: Language,
) -> Result<Dictionary, LoadError> {
    let code = language.code();
    let raw = match source {
        DictionarySource::Dir(dir) => {
            let path = dir.join(format!("{}.json", code));
            tokio::fs::read_to_string(&path)
                .await
                .map_err(|source| LoadError::Io { path, source })?
        }
        DictionarySource::BaseUrl(base) => {
            let url = format!("{}/{}.json", base.trim_end_matches('/'), code);
            let response = client
                .get(&url)
                .send()
                .await
                .map_err(|source| LoadError::Http {
                    url: url.clone(),
                    source,
                })?;
            if !response.status().is_success() {
                return Err(LoadError::Status {
                    url,
                    status: response.status(),
                });
            }
            response
                .text()
                .await
                .map_err(|source| LoadError::Http { url, source })?
        }
    };

    Dictionary::parse(&raw).map_err(|source| LoadError::Parse { code, source })
}

/// Load dictionaries for every enabled language concurrently.
///
/// Always returns a map with one entry per enabled language; failed loads are
/// logged and replaced with the degraded dictionary for that language.
pub async fn load_all(source: &DictionarySource) -> HashMap<&'static str, Dictionary> {
    let client = reqwest::Client::new();
    let fallback = Language::fallback_language();
    let languages = Language::all();

    let loads = languages
        .iter()
        .map(|&language| load_one(source, &client, language));
    let results = join_all(loads).await;

    let mut dictionaries = HashMap::new();
    for (language, result) in languages.into_iter().zip(results) {
        let dictionary = match result {
            Ok(dictionary) => {
                debug!("Loaded dictionary for '{}'", language.code());
                dictionary
            }
            Err(e) if language == fallback => {
                warn!(
                    "Failed to load fallback dictionary for '{}': {}",
                    language.code(),
                    e
                );
                Dictionary::load_error_placeholder()
            }
            Err(e) => {
                warn!("Failed to load dictionary for '{}': {}", language.code(), e);
                Dictionary::empty()
            }
        };
        dictionaries.insert(language.code(), dictionary);
    }

    dictionaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::dictionary::LOAD_ERROR_VALUE;
    use std::io::Write;

    fn write_dict(dir: &std::path::Path, code: &str, json: &str) {
        let mut file = std::fs::File::create(dir.join(format!("{}.json", code))).expect("create");
        file.write_all(json.as_bytes()).expect("write");
    }

    // ==================== Directory Source Tests ====================

    #[tokio::test]
    async fn test_load_all_from_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        for code in ["de", "en", "fr", "ch"] {
            write_dict(
                dir.path(),
                code,
                &format!(r#"{{"navigation": {{"home": "home-{}"}}}}"#, code),
            );
        }

        let dictionaries = load_all(&DictionarySource::Dir(dir.path().to_path_buf())).await;

        assert_eq!(dictionaries.len(), 4);
        assert_eq!(dictionaries["fr"].lookup("navigation.home"), Some("home-fr"));
    }

    #[tokio::test]
    async fn test_missing_non_fallback_language_degrades_to_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_dict(dir.path(), "de", r#"{"hero": {"title": "Grüezi"}}"#);
        // en, fr, ch files missing

        let dictionaries = load_all(&DictionarySource::Dir(dir.path().to_path_buf())).await;

        assert_eq!(dictionaries.len(), 4);
        assert!(dictionaries["en"].is_empty());
        assert!(dictionaries["ch"].is_empty());
        assert_eq!(dictionaries["de"].lookup("hero.title"), Some("Grüezi"));
    }

    #[tokio::test]
    async fn test_missing_fallback_language_records_error_placeholder() {
        let dir = tempfile::tempdir().expect("tempdir");
        // No files at all: fallback (de) gets the placeholder, others are empty.

        let dictionaries = load_all(&DictionarySource::Dir(dir.path().to_path_buf())).await;

        assert_eq!(dictionaries["de"].lookup("error"), Some(LOAD_ERROR_VALUE));
        assert!(dictionaries["en"].is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_dictionary_degrades() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_dict(dir.path(), "de", r#"{"ok": "ja"}"#);
        write_dict(dir.path(), "fr", "{broken");

        let dictionaries = load_all(&DictionarySource::Dir(dir.path().to_path_buf())).await;

        assert!(dictionaries["fr"].is_empty());
        assert_eq!(dictionaries["de"].lookup("ok"), Some("ja"));
    }

    // ==================== HTTP Source Tests ====================

    #[tokio::test]
    async fn test_load_all_from_http_base_url() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        for code in ["de", "en", "fr", "ch"] {
            Mock::given(method("GET"))
                .and(path(format!("/i18n/{}.json", code)))
                .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                    r#"{{"meta": {{"title": "title-{}"}}}}"#,
                    code
                )))
                .mount(&server)
                .await;
        }

        let source = DictionarySource::BaseUrl(format!("{}/i18n", server.uri()));
        let dictionaries = load_all(&source).await;

        assert_eq!(dictionaries["ch"].lookup("meta.title"), Some("title-ch"));
        assert_eq!(dictionaries["de"].lookup("meta.title"), Some("title-de"));
    }

    #[tokio::test]
    async fn test_http_404_for_one_language_does_not_block_others() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        for code in ["de", "en", "ch"] {
            Mock::given(method("GET"))
                .and(path(format!("/{}.json", code)))
                .respond_with(
                    ResponseTemplate::new(200).set_body_string(r#"{"hero": {"title": "x"}}"#),
                )
                .mount(&server)
                .await;
        }
        // fr.json is not mounted and returns 404

        let source = DictionarySource::BaseUrl(server.uri());
        let dictionaries = load_all(&source).await;

        assert!(dictionaries["fr"].is_empty());
        assert_eq!(dictionaries["en"].lookup("hero.title"), Some("x"));
    }

    // ==================== Error Display Tests ====================

    #[test]
    fn test_load_error_messages_name_the_resource() {
        let err = LoadError::Parse {
            code: "fr",
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert!(err.to_string().contains("'fr'"));
    }
}
