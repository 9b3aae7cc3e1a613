use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use secret_santa::{app, store::SqliteStore, AppState, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    let store = SqliteStore::connect(&config.database_url)
        .await
        .with_context(|| format!("opening {}", config.database_url))?;
    info!("connected to {}", config.database_url);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = app(AppState::new(Arc::new(store), config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("secret santa listening on {addr}");
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e}");
    }
}
