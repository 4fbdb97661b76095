use std::net::SocketAddr;
use topside_tracker::client::ReportApiClient;
use topside_tracker::{load_or_create_identity, router, AppState, Config};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env()?;
    let identity = load_or_create_identity(&config.data_path).await?;
    let api = ReportApiClient::new(&config.api_url, config.api_timeout)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        "report API at {}, trend days counted in {}",
        config.api_url, config.timezone
    );

    let app = router(AppState::new(config, api, identity));

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
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
