//! Swiss-visitor detection and the one-shot language-selection prompt.
//!
//! Visitors who look Swiss (locale, timezone, or a Swiss hint in the URL or
//! referrer) are offered a language choice once. The decision whether to
//! prompt is made here; the prompt content itself is an ordinary translatable
//! subtree built by the pages module, and the chosen language goes through
//! the engine like any other switch.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::dom::Document;
use crate::i18n::{I18nEngine, Language};
use crate::storage::{PreferenceStore, SWISS_MODAL_SEEN_KEY};

/// Substrings marking a URL or referrer as Swiss.
const SWISS_INDICATORS: [&str; 5] = ["ch", "schweiz", "suisse", "svizzera", "switzerland"];

/// Signals available for the Swiss check on a page visit.
#[derive(Debug, Default, Clone)]
pub struct VisitSignals {
    /// Normalized locale, e.g. `de-ch`.
    pub locale: Option<String>,
    /// IANA timezone name, e.g. `Europe/Zurich`.
    pub timezone: Option<String>,
    /// Full URL of the current page.
    pub page_url: String,
    /// Referrer URL, when present.
    pub referrer: Option<String>,
}

impl VisitSignals {
    /// Capture signals from the process environment (`TZ` and the locale
    /// variables) for the given page URL.
    pub fn from_env(page_url: &str) -> Self {
        VisitSignals {
            locale: crate::i18n::detect::system_locale(),
            timezone: std::env::var("TZ").ok().filter(|v| !v.is_empty()),
            page_url: page_url.to_string(),
            referrer: None,
        }
    }
}

/// Outcome of a Swiss visitor picking a language, for analytics collaborators.
#[derive(Debug, Clone)]
pub struct SwissSelection {
    pub language: Language,
    pub timestamp: DateTime<Utc>,
}

/// Decides, once per visitor, whether to offer the language prompt.
pub struct SwissVisitorPrompt {
    store: Arc<dyn PreferenceStore>,
    is_swiss: bool,
}

impl SwissVisitorPrompt {
    pub fn new(store: Arc<dyn PreferenceStore>, signals: &VisitSignals) -> Self {
        let is_swiss = is_swiss_visitor(signals);
        debug!(
            "Swiss visitor detection: {}",
            if is_swiss { "Swiss visitor" } else { "not Swiss" }
        );
        SwissVisitorPrompt { store, is_swiss }
    }

    pub fn is_swiss_visitor(&self) -> bool {
        self.is_swiss
    }

    pub fn has_seen_prompt(&self) -> bool {
        self.store.get(SWISS_MODAL_SEEN_KEY).as_deref() == Some("true")
    }

    /// True only for Swiss visitors who have not been prompted before.
    pub fn should_prompt(&self) -> bool {
        self.is_swiss && !self.has_seen_prompt()
    }

    /// Record that the prompt was shown, whether or not a language was picked.
    pub fn mark_seen(&self) {
        self.store.set(SWISS_MODAL_SEEN_KEY, "true");
    }

    /// Apply a selection made in the prompt and record it.
    ///
    /// The switch itself goes through [`I18nEngine::switch_language`] with
    /// its usual guards; the selection event carries whatever language is
    /// active afterwards.
    pub async fn choose(
        &self,
        engine: &mut I18nEngine,
        doc: &mut Document,
        code: &str,
    ) -> Option<SwissSelection> {
        engine.switch_language(code, doc).await;
        self.mark_seen();

        let language = engine.current_language()?;
        let selection = SwissSelection {
            language,
            timestamp: Utc::now(),
        };
        info!(
            language = language.code(),
            timestamp = %selection.timestamp,
            "Swiss visitor selected language"
        );
        Some(selection)
    }

    /// Visitor closed the prompt without choosing.
    pub fn dismiss(&self) {
        self.mark_seen();
    }
}

fn is_swiss_visitor(signals: &VisitSignals) -> bool {
    if let Some(locale) = &signals.locale {
        let locale = locale.to_lowercase();
        if locale.contains("ch") || locale == "de-ch" {
            return true;
        }
    }

    if signals.timezone.as_deref() == Some("Europe/Zurich") {
        return true;
    }

    let page_url = signals.page_url.to_lowercase();
    let referrer = signals
        .referrer
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    SWISS_INDICATORS
        .iter()
        .any(|indicator| page_url.contains(indicator) || referrer.contains(indicator))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::DictionarySource;
    use crate::storage::MemoryPreferenceStore;

    fn signals(locale: Option<&str>, timezone: Option<&str>, url: &str) -> VisitSignals {
        VisitSignals {
            locale: locale.map(str::to_string),
            timezone: timezone.map(str::to_string),
            page_url: url.to_string(),
            referrer: None,
        }
    }

    // ==================== Detection Tests ====================

    #[test]
    fn test_swiss_locale_detected() {
        assert!(is_swiss_visitor(&signals(Some("de-ch"), None, "/")));
        assert!(is_swiss_visitor(&signals(Some("fr-CH"), None, "/")));
    }

    #[test]
    fn test_zurich_timezone_detected() {
        assert!(is_swiss_visitor(&signals(
            Some("en-us"),
            Some("Europe/Zurich"),
            "/"
        )));
    }

    #[test]
    fn test_swiss_domain_detected() {
        assert!(is_swiss_visitor(&signals(
            None,
            None,
            "https://blacklodge.ch/"
        )));
        assert!(is_swiss_visitor(&signals(
            None,
            None,
            "https://example.com/schweiz"
        )));
    }

    #[test]
    fn test_swiss_referrer_detected() {
        let mut sig = signals(None, None, "https://example.com/");
        sig.referrer = Some("https://suisse-events.example/".to_string());
        assert!(is_swiss_visitor(&sig));
    }

    #[test]
    fn test_non_swiss_visitor() {
        assert!(!is_swiss_visitor(&signals(
            Some("de-de"),
            Some("Europe/Berlin"),
            "https://example.de/"
        )));
    }

    // ==================== Prompt Gating Tests ====================

    #[test]
    fn test_should_prompt_first_visit_only() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let prompt = SwissVisitorPrompt::new(store.clone(), &signals(Some("de-ch"), None, "/"));

        assert!(prompt.should_prompt());
        prompt.mark_seen();
        assert!(!prompt.should_prompt());
        assert!(prompt.has_seen_prompt());
    }

    #[test]
    fn test_no_prompt_for_non_swiss_visitor() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let prompt = SwissVisitorPrompt::new(store, &signals(Some("de-de"), None, "https://example.de/"));
        assert!(!prompt.should_prompt());
    }

    #[test]
    fn test_dismiss_marks_seen() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let prompt = SwissVisitorPrompt::new(store, &signals(Some("de-ch"), None, "/"));
        prompt.dismiss();
        assert!(!prompt.should_prompt());
    }

    // ==================== Selection Tests ====================

    #[tokio::test]
    async fn test_choose_switches_language_and_marks_seen() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("de.json"), r#"{"hero": {"title": "Grüezi"}}"#)
            .expect("write");
        std::fs::write(dir.path().join("ch.json"), r#"{"hero": {"title": "Hoi"}}"#)
            .expect("write");

        let store = Arc::new(MemoryPreferenceStore::new());
        let mut engine = I18nEngine::new(store.clone());
        let mut doc = Document::new("/");
        engine
            .initialize(&DictionarySource::Dir(dir.path().to_path_buf()), &mut doc)
            .await;

        let prompt = SwissVisitorPrompt::new(store, &signals(Some("fr-ch"), None, "/"));
        let selection = prompt.choose(&mut engine, &mut doc, "ch").await;

        assert_eq!(
            selection.expect("selection").language,
            Language::SWISS_GERMAN
        );
        assert_eq!(engine.current_language(), Some(Language::SWISS_GERMAN));
        assert!(prompt.has_seen_prompt());
    }
}
