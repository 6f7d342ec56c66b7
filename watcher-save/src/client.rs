//! Settings endpoint client
//!
//! One POST per save to `<url_base>/ajax/save_settings`, form-encoded with
//! a single `data` field holding the JSON document. The server answers with
//! a JSON body whose `response` field is `"fail"` on failure; anything else
//! counts as saved. No retries.

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use watcher_settings::SettingsDocument;

/// Path of the save endpoint below the url base
pub const SAVE_PATH: &str = "/ajax/save_settings";

const USER_AGENT: &str = concat!("watcher-save/", env!("CARGO_PKG_VERSION"));

/// Transport-level submission errors
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {0}: {1}")]
    Status(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Encoding error: {0}")]
    Encode(#[from] watcher_settings::Error),
}

/// What the server said about a delivered document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// Server answered `"response": "fail"`
    Rejected,
}

impl SaveOutcome {
    /// Interpret the response body
    pub fn from_body(body: &str) -> Result<Self, SubmitError> {
        let value: Value =
            serde_json::from_str(body).map_err(|e| SubmitError::Parse(e.to_string()))?;

        if value.get("response").and_then(Value::as_str) == Some("fail") {
            Ok(SaveOutcome::Rejected)
        } else {
            Ok(SaveOutcome::Saved)
        }
    }
}

/// HTTP client for the settings endpoint
pub struct SettingsClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl SettingsClient {
    pub fn new(url_base: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: endpoint_for(url_base),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post the document and read back the server's verdict
    pub async fn submit(&self, document: &SettingsDocument) -> Result<SaveOutcome, SubmitError> {
        let payload = document.to_json()?;

        tracing::debug!(endpoint = %self.endpoint, bytes = payload.len(), "Posting settings");

        let response = self
            .http_client
            .post(&self.endpoint)
            .form(&[("data", payload.as_str())])
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(SubmitError::Status(status.as_u16(), body));
        }

        let outcome = SaveOutcome::from_body(&body)?;
        tracing::info!(endpoint = %self.endpoint, outcome = ?outcome, "Settings submitted");
        Ok(outcome)
    }
}

fn endpoint_for(url_base: &str) -> String {
    format!("{}{}", url_base.trim_end_matches('/'), SAVE_PATH)
}
