//! Demo HTTP server rendering the translated pages.
//!
//! One engine serves all requests; each request builds its page document,
//! carries the request's `lang` query into the page URL, and runs the normal
//! detection + activation sequence before rendering. This keeps the engine
//! the single place where language state lives.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use crate::dom::{Document, Node, NodeRole};
use crate::i18n::{detect, I18nEngine, LANG_PARAM};
use crate::pages;
use crate::storage::PreferenceStore;

pub struct AppState {
    engine: Mutex<I18nEngine>,
    store: Arc<dyn PreferenceStore>,
}

impl AppState {
    pub fn new(engine: I18nEngine, store: Arc<dyn PreferenceStore>) -> Self {
        AppState {
            engine: Mutex::new(engine),
            store,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/kontakt", get(contact))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    lang: Option<String>,
}

async fn home(State(state): State<Arc<AppState>>, Query(query): Query<PageQuery>) -> Html<String> {
    render_page(&state, pages::home(), query).await
}

async fn contact(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    render_page(&state, pages::contact(), query).await
}

async fn render_page(state: &AppState, mut doc: Document, query: PageQuery) -> Html<String> {
    if let Some(lang) = &query.lang {
        doc.url.set_param(LANG_PARAM, lang);
    }

    let language = detect::detect(
        &doc.url,
        state.store.as_ref(),
        detect::system_locale().as_deref(),
    );

    let mut engine = state.engine.lock().await;
    engine.set_language(language.code(), &mut doc);

    Html(render_html(&doc))
}

/// Minimal HTML rendering of a translated document.
fn render_html(doc: &Document) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n");
    out.push_str(&format!("<html lang=\"{}\">\n<head>\n", escape(&doc.lang)));
    out.push_str(&format!("<title>{}</title>\n", escape(&doc.title)));
    for (name, content) in doc.meta_tags() {
        out.push_str(&format!(
            "<meta name=\"{}\" content=\"{}\">\n",
            escape(name),
            escape(content)
        ));
    }
    out.push_str("</head>\n<body>\n");
    render_node(&doc.body, &mut out);
    out.push_str("</body>\n</html>\n");
    out
}

fn render_node(node: &Node, out: &mut String) {
    match node.role {
        NodeRole::SubmitControl => {
            out.push_str(&format!(
                "<input type=\"submit\" value=\"{}\">\n",
                escape(&node.value)
            ));
        }
        NodeRole::TextInput => {
            out.push_str(&format!(
                "<input type=\"text\" placeholder=\"{}\">\n",
                escape(&node.placeholder)
            ));
        }
        NodeRole::Tooltip => {
            out.push_str(&format!(
                "<span title=\"{}\">{}</span>\n",
                escape(node.tooltip.as_deref().unwrap_or_default()),
                escape(&node.text)
            ));
        }
        NodeRole::Text => {
            if let Some(code) = &node.language_option {
                out.push_str(&format!(
                    "<button class=\"language-btn{}\" data-lang=\"{}\">{}</button>\n",
                    if node.active { " active" } else { "" },
                    escape(code),
                    escape(&node.text)
                ));
            } else if node.shows_current_language {
                out.push_str(&format!(
                    "<span class=\"current-language\">{}</span>\n",
                    escape(&node.text)
                ));
            } else if !node.text.is_empty() {
                out.push_str(&format!("<span>{}</span>\n", escape(&node.text)));
            }
        }
    }
    for child in &node.children {
        render_node(child, out);
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
