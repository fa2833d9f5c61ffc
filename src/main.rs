mod config;
mod error;
mod routes;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::error::ServerError;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env();
    match config.api_base_url.as_deref() {
        Some(upstream) => tracing::info!(%upstream, "proxying /api"),
        None => tracing::warn!("API_BASE_URL not set; /api requests will return 503"),
    }

    let app = routes::app(&config)?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .map_err(ServerError::Bind)?;

    tracing::info!(port = config.port, "workhub listening");
    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
