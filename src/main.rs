use std::sync::Arc;
use std::time::Duration;

use mcp_tvmaze::adapters::tvmaze_http::{TvMazeHttpAdapter, DEFAULT_BASE_URL};
use mcp_tvmaze::app::catalog_usecases::{CatalogUseCases, DEFAULT_REQUEST_TIMEOUT};

fn base_url_from_env() -> String {
    std::env::var("TVMAZE_MCP_BASE_URL")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

fn request_timeout_from_env() -> Duration {
    std::env::var("TVMAZE_MCP_REQUEST_TIMEOUT_MS")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = if std::env::var("TVMAZE_MCP_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_env("TVMAZE_MCP_LOG")
    } else {
        tracing_subscriber::EnvFilter::new("mcp_tvmaze=info")
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // log to stderr so stdout stays clean for MCP
        .with_env_filter(env_filter)
        .init();

    let base_url = base_url_from_env();
    let request_timeout = request_timeout_from_env();

    tracing::info!("upstream base url: {}", base_url);
    tracing::info!("upstream request timeout: {:?}", request_timeout);

    let upstream = Arc::new(TvMazeHttpAdapter::new(base_url).map_err(anyhow::Error::new)?);
    let catalog = Arc::new(CatalogUseCases::with_timeout(upstream, request_timeout));

    mcp_tvmaze::adapters::mcp_stdio::start_mcp_server(catalog).await?;

    Ok(())
}
