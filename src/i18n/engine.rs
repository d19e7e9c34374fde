//! Translation store & resolver: the one stateful object of the site.
//!
//! The engine owns the loaded dictionaries, the active language, the
//! preference store handle, and the registered observers. It is constructed
//! once at startup and passed by reference to every collaborator that needs
//! translation — there is no ambient global instance.
//!
//! Lifecycle: `Uninitialized` (no dictionaries, no active language) becomes
//! `Ready` exactly once via [`I18nEngine::initialize`]; afterwards the active
//! language changes only through [`I18nEngine::switch_language`]. There is no
//! teardown; the engine lives for the page session. Nothing the engine does
//! propagates an error to its caller — failures degrade and get logged.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::dom::{Document, Node, NodeRole};
use crate::i18n::detect::{self, LANG_PARAM};
use crate::i18n::loader::{self, DictionarySource};
use crate::i18n::{Dictionary, Language, LanguageRegistry};
use crate::storage::{PreferenceStore, LANGUAGE_KEY};

/// Collaborator interested in language changes.
///
/// Registered with [`I18nEngine::subscribe`] at construction time and
/// notified from `switch_language` with the new language. Collaborators are
/// not probed for optional hooks; this trait is the only channel.
pub trait LanguageObserver: Send + Sync {
    fn language_changed(&self, language: Language);
}

/// The i18n engine: dictionaries, active language, persistence, propagation.
pub struct I18nEngine {
    dictionaries: HashMap<&'static str, Dictionary>,
    active: Option<Language>,
    store: Arc<dyn PreferenceStore>,
    observers: Vec<Arc<dyn LanguageObserver>>,
}

impl I18nEngine {
    /// Create an uninitialized engine bound to a preference store.
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        I18nEngine {
            dictionaries: HashMap::new(),
            active: None,
            store,
            observers: Vec::new(),
        }
    }

    /// Register an observer for language-change notifications.
    pub fn subscribe(&mut self, observer: Arc<dyn LanguageObserver>) {
        self.observers.push(observer);
    }

    /// Load all dictionaries, detect the starting language, and activate it.
    ///
    /// Loading settles per language (see the loader); detection consults the
    /// page URL, the stored preference, and the system locale. The full
    /// `set_language` effect sequence runs, including the initial whole-page
    /// apply pass. This never fails: anything unexpected degrades to the
    /// default language.
    pub async fn initialize(&mut self, source: &DictionarySource, doc: &mut Document) {
        self.dictionaries = loader::load_all(source).await;

        let detected = detect::detect(&doc.url, self.store.as_ref(), detect::system_locale().as_deref());
        self.set_language(detected.code(), doc);

        info!(
            "i18n initialized with language '{}'",
            detected.code()
        );
    }

    /// True once `initialize` has run.
    pub fn is_ready(&self) -> bool {
        self.active.is_some() && !self.dictionaries.is_empty()
    }

    /// The active language, if the engine is initialized.
    pub fn current_language(&self) -> Option<Language> {
        self.active
    }

    /// Whether a code names a supported, enabled language.
    pub fn is_supported(&self, code: &str) -> bool {
        LanguageRegistry::get().is_enabled(code)
    }

    /// Low-level language activation. Unsupported codes are coerced to the
    /// default language; the effect sequence always runs in full, even when
    /// the resolved code equals the current one:
    ///
    /// 1. update the active language
    /// 2. persist it to the preference store
    /// 3. update the document language attribute
    /// 4. apply translations to the whole document
    /// 5. rewrite the URL `lang` parameter (removed for the default language)
    pub fn set_language(&mut self, code: &str, doc: &mut Document) {
        let language =
            Language::from_code(code).unwrap_or_else(|_| Language::default_language());

        self.active = Some(language);
        self.store.set(LANGUAGE_KEY, language.code());
        doc.lang = language.code().to_string();
        self.apply_to_document(doc);

        if language.is_default() {
            doc.url.remove_param(LANG_PARAM);
        } else {
            doc.url.set_param(LANG_PARAM, language.code());
        }
    }

    /// User-facing language switch.
    ///
    /// A no-op when the code is unsupported or already active — no store
    /// write, no notification. Otherwise runs `set_language`, re-applies
    /// translations once more after a short delay to catch nodes mounted
    /// asynchronously by collaborators, and notifies observers.
    pub async fn switch_language(&mut self, code: &str, doc: &mut Document) {
        if !self.is_supported(code) || self.active.map(|l| l.code()) == Some(code) {
            return;
        }

        self.set_language(code, doc);

        tokio::time::sleep(Duration::from_millis(50)).await;
        self.apply_to_document(doc);

        if let Some(language) = self.active {
            for observer in &self.observers {
                observer.language_changed(language);
            }
            info!("Language switched to '{}'", language.code());
        }
    }

    /// Resolve a dotted key against the active dictionary with fallback.
    ///
    /// Misses restart the walk against the fallback dictionary; a miss there
    /// too returns the key itself, so the page always renders something
    /// stable and visibly wrong rather than blank. A path that resolves to a
    /// subtree (not a string leaf) in the active dictionary also returns the
    /// key, without consulting the fallback.
    pub fn resolve<'a>(&'a self, key: &'a str) -> &'a str {
        let Some(active) = self.active else {
            return key;
        };

        match self.dictionaries.get(active.code()).and_then(|d| d.resolve_path(key)) {
            Some(serde_json::Value::String(s)) => s,
            Some(_) => key,
            None => {
                let fallback = Language::fallback_language();
                match self
                    .dictionaries
                    .get(fallback.code())
                    .and_then(|d| d.lookup(key))
                {
                    Some(s) => s,
                    None => key,
                }
            }
        }
    }

    /// Apply translations to the whole document: every translatable node,
    /// the language-switcher controls, and the page metadata.
    pub fn apply_to_document(&self, doc: &mut Document) {
        let Some(active) = self.active else {
            warn!("apply_to_document called before initialization");
            return;
        };

        if self
            .dictionaries
            .get(active.code())
            .map(Dictionary::is_empty)
            .unwrap_or(true)
        {
            warn!("No translations loaded for language '{}'", active.code());
        }

        let mut body = std::mem::take(&mut doc.body);
        self.apply_to_subtree(&mut body);
        doc.body = body;

        self.update_metadata(doc);
    }

    /// Apply translations to one subtree. Collaborators call this after
    /// mounting new markup so late nodes get translated without a full pass.
    pub fn apply_to_subtree(&self, root: &mut Node) {
        root.for_each_mut(&mut |node| self.apply_node(node));
    }

    fn apply_node(&self, node: &mut Node) {
        if let Some(key) = node.key.clone() {
            let translation = self.resolve(&key).to_string();
            match node.role {
                NodeRole::SubmitControl => node.value = translation,
                NodeRole::TextInput => node.placeholder = translation,
                NodeRole::Tooltip => node.tooltip = Some(translation),
                NodeRole::Text => node.text = translation,
            }
        }

        if let Some(active) = self.active {
            if let Some(code) = &node.language_option {
                node.active = code == active.code();
            }
            if node.shows_current_language {
                node.text = active.display_code();
            }
        }
    }

    /// Project the reserved `meta.*` branch onto the page metadata. Fields
    /// absent from the active dictionary are left untouched.
    fn update_metadata(&self, doc: &mut Document) {
        if let Some(title) = self.meta_value("meta.title") {
            doc.title = title.clone();
            doc.set_meta("og:title", &title);
            doc.set_meta("twitter:title", &title);
        }
        if let Some(description) = self.meta_value("meta.description") {
            doc.set_meta("description", &description);
            doc.set_meta("og:description", &description);
            doc.set_meta("twitter:description", &description);
        }
    }

    /// A `meta.*` leaf from the active dictionary only — the fallback is not
    /// consulted for metadata, and an unresolved key must not leak into tags.
    fn meta_value(&self, key: &str) -> Option<String> {
        let active = self.active?;
        self.dictionaries
            .get(active.code())?
            .lookup(key)
            .map(str::to_string)
    }
}
