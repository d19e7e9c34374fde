//! Page model: the document tree the i18n engine rewrites in place.
//!
//! There is no real DOM here. Page builders construct a `Document` out of
//! `Node` values, and the engine writes resolved translations into the slot
//! selected by each node's role (visible text, submit label, placeholder hint,
//! or tooltip text).

use std::collections::BTreeMap;
use std::fmt;

/// How a translated string is written into a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeRole {
    /// Plain content node; translation goes to the visible text.
    #[default]
    Text,
    /// Submit-style control; translation goes to the displayed label value.
    SubmitControl,
    /// Text-entry control; translation goes to the placeholder hint, never the value.
    TextInput,
    /// Node carrying a tooltip attribute; translation goes to the tooltip text.
    Tooltip,
}

/// One element of the page tree.
///
/// A node participates in translation when `key` is set. The language-switcher
/// markers (`language_option`, `shows_current_language`) are read and updated
/// by the engine's apply pass but carry no translation key themselves.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub role: NodeRole,
    /// Dot-separated translation key, e.g. `services.cocktail.title`.
    pub key: Option<String>,
    pub text: String,
    /// Displayed label of a submit control.
    pub value: String,
    /// Hint text of a text-entry control.
    pub placeholder: String,
    pub tooltip: Option<String>,
    /// Language-choice control selecting the given code.
    pub language_option: Option<String>,
    /// Marker toggled on the language-choice control matching the active code.
    pub active: bool,
    /// Control displaying the active language code (e.g. "DE" in the navbar).
    pub shows_current_language: bool,
    pub children: Vec<Node>,
}

impl Node {
    /// Translatable text node.
    pub fn text(key: &str) -> Self {
        Node {
            key: Some(key.to_string()),
            ..Node::default()
        }
    }

    /// Untranslated text node (logos, fixed copy).
    pub fn static_text(text: &str) -> Self {
        Node {
            text: text.to_string(),
            ..Node::default()
        }
    }

    /// Submit control whose label is translated.
    pub fn submit(key: &str) -> Self {
        Node {
            role: NodeRole::SubmitControl,
            key: Some(key.to_string()),
            ..Node::default()
        }
    }

    /// Text-entry control whose placeholder is translated.
    pub fn input(key: &str) -> Self {
        Node {
            role: NodeRole::TextInput,
            key: Some(key.to_string()),
            ..Node::default()
        }
    }

    /// Node whose tooltip text is translated.
    pub fn tooltip(key: &str, text: &str) -> Self {
        Node {
            role: NodeRole::Tooltip,
            key: Some(key.to_string()),
            text: text.to_string(),
            tooltip: Some(String::new()),
            ..Node::default()
        }
    }

    /// Language-choice button for the given code.
    pub fn language_option(code: &str) -> Self {
        Node {
            language_option: Some(code.to_string()),
            text: code.to_uppercase(),
            ..Node::default()
        }
    }

    /// Control showing the active language code.
    pub fn current_language_display() -> Self {
        Node {
            shows_current_language: true,
            ..Node::default()
        }
    }

    /// Container node grouping children.
    pub fn container(children: Vec<Node>) -> Self {
        Node {
            children,
            ..Node::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Visit this node and every descendant, depth first.
    pub fn for_each_mut<F: FnMut(&mut Node)>(&mut self, f: &mut F) {
        f(self);
        for child in &mut self.children {
            child.for_each_mut(f);
        }
    }

    /// Count nodes in this subtree matching a predicate.
    pub fn count<F: Fn(&Node) -> bool>(&self, f: &F) -> usize {
        let mut n = usize::from(f(self));
        for child in &self.children {
            n += child.count(f);
        }
        n
    }

    /// First node in this subtree carrying the given translation key.
    pub fn find_by_key(&self, key: &str) -> Option<&Node> {
        if self.key.as_deref() == Some(key) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_key(key))
    }
}

/// Page location: path plus ordered query parameters.
///
/// Rewritten by the engine without navigation; the `lang` parameter is removed
/// entirely when the active language is the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageUrl {
    path: String,
    params: Vec<(String, String)>,
}

impl PageUrl {
    pub fn new(path: &str) -> Self {
        PageUrl {
            path: path.to_string(),
            params: Vec::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set or replace a query parameter, keeping its position stable.
    pub fn set_param(&mut self, name: &str, value: &str) {
        match self.params.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => self.params.push((name.to_string(), value.to_string())),
        }
    }

    pub fn remove_param(&mut self, name: &str) {
        self.params.retain(|(k, _)| k != name);
    }
}

impl fmt::Display for PageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            write!(f, "{}{}={}", if i == 0 { '?' } else { '&' }, k, v)?;
        }
        Ok(())
    }
}

/// The whole page surface the engine owns during an apply pass: location,
/// metadata, language attribute, and the node tree.
#[derive(Debug, Clone)]
pub struct Document {
    /// Document language attribute (`<html lang="…">`).
    pub lang: String,
    pub title: String,
    meta: BTreeMap<String, String>,
    pub url: PageUrl,
    pub body: Node,
}

impl Document {
    pub fn new(path: &str) -> Self {
        Document {
            lang: String::new(),
            title: String::new(),
            meta: BTreeMap::new(),
            url: PageUrl::new(path),
            body: Node::default(),
        }
    }

    pub fn meta(&self, name: &str) -> Option<&str> {
        self.meta.get(name).map(String::as_str)
    }

    pub fn set_meta(&mut self, name: &str, content: &str) {
        self.meta.insert(name.to_string(), content.to_string());
    }

    /// All meta tags in name order.
    pub fn meta_tags(&self) -> impl Iterator<Item = (&str, &str)> {
        self.meta.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Visit every node in the document body.
    pub fn for_each_node_mut<F: FnMut(&mut Node)>(&mut self, f: &mut F) {
        self.body.for_each_mut(f);
    }
}
