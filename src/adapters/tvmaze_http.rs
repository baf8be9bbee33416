use async_trait::async_trait;
use serde_json::Value;

use crate::{
    app::ports::{Endpoint, UpstreamPort},
    domain::errors::{DomainError, Result},
};

pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Upstream catalog backed by the public TVMaze REST API.
pub struct TvMazeHttpAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl TvMazeHttpAdapter {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("mcp-tvmaze/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Network(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }
}

fn classify_status(endpoint: &Endpoint, status: reqwest::StatusCode) -> Result<()> {
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(endpoint.not_found());
    }
    if !status.is_success() {
        return Err(endpoint.status_error(status.as_u16()));
    }
    Ok(())
}

fn transport_error(err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::Timeout
    } else {
        DomainError::Network(err.to_string())
    }
}

#[async_trait]
impl UpstreamPort for TvMazeHttpAdapter {
    async fn get_json(&self, endpoint: &Endpoint) -> Result<Value> {
        let url = self.url(endpoint);
        let response = self
            .client
            .get(&url)
            .query(&endpoint.query())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        tracing::debug!(%url, status = status.as_u16(), "upstream response");
        classify_status(endpoint, status)?;

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| DomainError::Decode(e.to_string()))
    }
}
