//! Moodtune Gateway: mood chat and speech over HTTP.
//! Collaborators are wired once from `MoodtuneConfig` and shared through `AppState`.

mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use moodtune_core::{MoodChat, MoodtuneConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = MoodtuneConfig::load().context("loading configuration")?;
    if cfg.youtube.api_key.is_empty() {
        tracing::warn!("no YouTube key configured; playlist links will fall back to sentinels");
    }

    let chat = MoodChat::from_config(&cfg).context("wiring collaborators")?;
    tracing::info!(
        version = moodtune_core::version(),
        tts = ?cfg.tts.provider,
        audio_dir = %cfg.server.audio_dir.display(),
        "Moodtune ready"
    );

    let state = Arc::new(AppState {
        chat,
        static_dir: cfg.server.static_dir.clone(),
    });
    let app = routes::router(state);

    let addr = format!("{}:{}", cfg.server.host, cfg.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    tracing::info!("listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;
    Ok(())
}
