use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, info_span, instrument};

use crate::model::filter::Filter;
use crate::model::game::GameSummary;
use crate::model::reference::ReferenceOption;

/// Global per-request timeout. Expiry surfaces as `FetchError::Network`.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Failure taxonomy for catalog API requests. An empty result is not an
/// error and never reaches this type.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not complete (connect failure, timeout, truncated
    /// body).
    #[error("request failed: {0}")]
    Network(String),
    /// The server answered with a non-success status.
    #[error("server returned status {0}")]
    Server(u16),
    /// The body was not the expected JSON shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the catalog's JSON API, wrapping the base URL and a shared
/// agent with a request timeout.
#[derive(Clone)]
pub struct CatalogApi {
    base_url: String,
    agent: ureq::Agent,
}

impl std::fmt::Debug for CatalogApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogApi").field("base_url", &self.base_url).finish()
    }
}

impl CatalogApi {
    /// Create a client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .new_agent();
        CatalogApi { base_url: base_url.into(), agent }
    }

    /// Fetch the platform reference list, preserving response order.
    #[instrument(level = "info", skip(self))]
    pub fn fetch_platforms(&self) -> Result<Vec<ReferenceOption>, FetchError> {
        let body = self.get("/api/platforms")?;
        let options = decode_options(&body)?;
        info!(count = options.len(), "Fetched platform options");
        Ok(options)
    }

    /// Fetch the genre reference list, preserving response order.
    #[instrument(level = "info", skip(self))]
    pub fn fetch_genres(&self) -> Result<Vec<ReferenceOption>, FetchError> {
        let body = self.get("/api/genres")?;
        let options = decode_options(&body)?;
        info!(count = options.len(), "Fetched genre options");
        Ok(options)
    }

    /// Fetch the games matching the given filter. All filtering happens
    /// server-side; the returned order is the server's and is rendered as-is.
    #[instrument(level = "info", skip(self))]
    pub fn fetch_games(&self, filter: &Filter) -> Result<Vec<GameSummary>, FetchError> {
        let query = filter.to_query_string();
        let path = if query.is_empty() {
            "/api/games".to_string()
        } else {
            format!("/api/games?{}", query)
        };
        let body = self.get(&path)?;
        let games = decode_games(&body)?;
        info!(count = games.len(), "Fetched games");
        Ok(games)
    }

    /// Issue a GET and return the response body, mapping transport failures
    /// to `Network` and non-success statuses to `Server`.
    fn get(&self, path_and_query: &str) -> Result<String, FetchError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response_result = {
            let _span = info_span!("catalog_fetch", url = %url).entered();
            self.agent.get(&url).call()
        };
        match response_result {
            Ok(response) => {
                let mut body_reader = response.into_body();
                match body_reader.read_to_string() {
                    Ok(body) => Ok(body),
                    Err(e) => {
                        error!(error = %e, url = %url, "Failed to read response body");
                        Err(FetchError::Network(e.to_string()))
                    }
                }
            }
            Err(ureq::Error::StatusCode(code)) => {
                error!(status = code, url = %url, "Server returned non-success status");
                Err(FetchError::Server(code))
            }
            Err(e) => {
                error!(error = %e, url = %url, "Request failed");
                Err(FetchError::Network(e.to_string()))
            }
        }
    }
}

/// Decode a reference-data body (`[{id, name}, ...]`). Split out so tests can
/// exercise parsing without a network.
pub fn decode_options(body: &str) -> Result<Vec<ReferenceOption>, FetchError> {
    Ok(serde_json::from_str::<Vec<ReferenceOption>>(body)?)
}

/// Decode a games body into summaries, preserving response order.
pub fn decode_games(body: &str) -> Result<Vec<GameSummary>, FetchError> {
    Ok(serde_json::from_str::<Vec<GameSummary>>(body)?)
}
