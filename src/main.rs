//! Mood-aware chat API
//!
//! (c) Softlandia 2025

use mood_chat_api::api;
use mood_chat_api::build_provider;
use mood_chat_api::config::Settings;
use mood_chat_api::core::locks::UserLocks;
use mood_chat_api::infrastructure::classifier::HttpSentimentClassifier;
use mood_chat_api::infrastructure::database::DatabaseConnection;

use anyhow::Context;
use log::info;
use tokio::runtime::{Builder, Runtime};

fn main() -> anyhow::Result<()> {
    // initialize tracing
    tracing_subscriber::fmt::init();

    let settings = Settings::from_env()?;

    let runtime: Runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(web_server_task(settings))
}

async fn web_server_task(settings: Settings) -> anyhow::Result<()> {
    let database = DatabaseConnection::connect(&settings.database_url).await?;

    // loaded once, shared read-only by every request
    let classifier = HttpSentimentClassifier::new(&settings)?;
    info!("sentiment classifier at {}", classifier.endpoint());

    let locks = UserLocks::new(settings.serialize_user_writes);
    if locks.is_enabled() {
        info!("per-user write serialization enabled");
    }

    let provider = build_provider(database, classifier, locks)?;

    let app = api::app(provider, api::cors_layer(&settings.cors_allowed_origins)?);

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("cannot bind {}", settings.bind_addr))?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    info!("Shutting down...");

    Ok(())
}
