//! Client for the upstream wagon registry.
//!
//! The registry is a third-party endpoint returning `{ "Vagons": [ ... ] }`.
//! Every fetch is fresh; nothing is cached. Callers decide how to handle
//! failures - the wagon board view degrades to an empty list instead of
//! propagating them.

use std::time::Duration;

use tracing::debug;

use crate::models::WagonRecord;

/// HTTP connect timeout for registry fetches.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(3);

/// Upstream registry errors.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Request failed (connect, timeout, or body read)
    #[error("Wagon registry request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Registry answered with a non-success status
    #[error("Wagon registry returned status {0}")]
    Status(reqwest::StatusCode),

    /// Registry payload did not decode as wagon records
    #[error("Wagon registry payload invalid: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Upstream wagon registry client.
#[derive(Debug, Clone)]
pub struct WagonSource {
    http_client: reqwest::Client,
    url: String,
}

impl WagonSource {
    /// Create a client for the given registry URL with a bounded timeout.
    ///
    /// The timeout covers the whole request; without it a hanging registry
    /// would hang every wagon board view with it.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client for wagon registry");

        WagonSource {
            http_client,
            url: url.into(),
        }
    }

    /// Fetch the current wagon list from the registry.
    pub async fn fetch(&self) -> Result<Vec<WagonRecord>, UpstreamError> {
        let response = self.http_client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;
        let records = parse_vagon_envelope(body)?;

        debug!("Fetched {} wagon records", records.len());
        Ok(records)
    }
}

/// Extract wagon records from the registry envelope.
///
/// A missing, null, or non-array `Vagons` field is an empty list, matching
/// how lenient the registry's consumers have to be. An array that does not
/// decode as wagon records is a decode error.
pub(crate) fn parse_vagon_envelope(
    body: serde_json::Value,
) -> Result<Vec<WagonRecord>, serde_json::Error> {
    match body.get("Vagons") {
        Some(vagons @ serde_json::Value::Array(_)) => serde_json::from_value(vagons.clone()),
        _ => Ok(Vec::new()),
    }
}
