use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use blacklodge_site::config::Config;
use blacklodge_site::i18n::I18nEngine;
use blacklodge_site::server::{self, AppState};
use blacklodge_site::storage::FilePreferenceStore;
use blacklodge_site::{pages, swiss};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("blacklodge_site=info".parse()?),
        )
        .init();

    info!("Starting Blacklodge site");

    // Load configuration from environment
    let config = Config::from_env();

    let store = Arc::new(FilePreferenceStore::open(&config.prefs_file)?);

    // Initialize the i18n engine against the home page
    let mut engine = I18nEngine::new(store.clone());
    let mut doc = pages::home();
    engine
        .initialize(&config.dictionary_source(), &mut doc)
        .await;

    // Swiss-visitor check for this session
    let signals = swiss::VisitSignals::from_env("/");
    let prompt = swiss::SwissVisitorPrompt::new(store.clone(), &signals);
    if prompt.should_prompt() {
        info!("Swiss visitor detected; language prompt would be shown");
    }

    let state = Arc::new(AppState::new(engine, store));
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
