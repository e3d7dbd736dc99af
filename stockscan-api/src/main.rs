use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use stockscan_api::{app, AppState};
use stockscan_store::{app_config::Config, NotionStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockscan_api=debug,stockscan_core=debug,stockscan_store=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting stock scanner on port {}", config.server.port);
    tracing::debug!("Using database {}", config.store.database_id);

    let store = NotionStore::new(&config.store).context("Failed to build inventory store client")?;
    let app_state = AppState::with_attempt_capacity(Arc::new(store), config.server.attempt_capacity);

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
