//! HTTP source.
//!
//! Fetches source files relative to a base URL, the way the dashboard
//! fetches its converted JSON files from the web server.

use std::time::Duration;

use reqwest::Client;

use super::source::RecordSource;
use crate::error::{EngineError, EngineResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = concat!("folha-engine/", env!("CARGO_PKG_VERSION"));

/// Fetches source files over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    /// Creates a source for a base URL with a default client.
    ///
    /// Fails with [`EngineError::SourceUnavailable`] if the HTTP client
    /// cannot be built.
    pub fn new(base_url: impl Into<String>) -> EngineResult<Self> {
        let base_url = base_url.into();
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| EngineError::SourceUnavailable {
                name: base_url.clone(),
                message: e.to_string(),
            })?;
        Ok(Self::with_client(client, base_url))
    }

    /// Creates a source for a base URL with a caller-provided client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Returns the URL a source file is fetched from.
    pub fn url_for(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            name.trim_start_matches('/')
        )
    }
}

impl RecordSource for HttpSource {
    async fn fetch(&self, name: &str) -> EngineResult<Vec<u8>> {
        let response = self
            .client
            .get(self.url_for(name))
            .send()
            .await
            .map_err(|e| EngineError::SourceUnavailable {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        if let Some(error) = classify_status(name, response.status().as_u16()) {
            return Err(error);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| EngineError::SourceUnavailable {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(body.to_vec())
    }
}

/// Maps a non-success HTTP status to an error.
///
/// 404 is a missing file, 429 and 5xx are transient, and any other
/// client error is a permanent rejection.
pub(crate) fn classify_status(name: &str, status: u16) -> Option<EngineError> {
    match status {
        200..=299 => None,
        404 => Some(EngineError::SourceNotFound {
            name: name.to_string(),
        }),
        429 | 500..=599 => Some(EngineError::SourceUnavailable {
            name: name.to_string(),
            message: format!("HTTP status {status}"),
        }),
        _ => Some(EngineError::SourceRejected {
            name: name.to_string(),
            status,
        }),
    }
}
