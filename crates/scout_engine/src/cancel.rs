use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct CancelSettings {
    pub endpoint: String,
    pub request_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum CancelError {
    #[error("cancel request failed: {0}")]
    Network(String),
    #[error("cancel endpoint returned http status {0}")]
    HttpStatus(u16),
}

/// Best-effort remote cancellation keyed by session id. The caller has
/// already cancelled locally when this runs; a failure here is logged by
/// the caller and never reverts the local state.
pub struct CancelClient {
    settings: CancelSettings,
    client: reqwest::Client,
}

impl CancelClient {
    pub fn new(settings: CancelSettings, client: reqwest::Client) -> Self {
        Self { settings, client }
    }

    pub async fn cancel(&self, session_id: &str) -> Result<(), CancelError> {
        let response = self
            .client
            .post(&self.settings.endpoint)
            .timeout(self.settings.request_timeout)
            .json(&serde_json::json!({ "sessionId": session_id }))
            .send()
            .await
            .map_err(|err| CancelError::Network(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(CancelError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
