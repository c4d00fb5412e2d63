use prayer_board::{prayer::AladhanClient, router, AppState, Config, FileStore};
use std::{net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    if let Some(parent) = config.data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let store = FileStore::open(config.data_path.clone()).await;
    info!("using store file {}", store.path().display());

    let source = AladhanClient::new(config.prayer_api.clone())?;
    info!(
        "prayer times for {}, {} (method {}) from {}",
        config.prayer_api.city, config.prayer_api.country, config.prayer_api.method, config.prayer_api.base_url
    );

    let app = router(AppState::new(Arc::new(store), source));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
    info!("shutting down");
}
