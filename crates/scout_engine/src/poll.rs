use std::time::Duration;

use scout_logging::{scout_info, scout_warn};
use tokio::time::{sleep, Instant};

use crate::types::{SeoPollOutcome, SeoStatus, SeoStatusResponse};

#[derive(Debug, Clone)]
pub struct PollSettings {
    /// Base status endpoint; the SEO session id is appended as a path
    /// segment.
    pub endpoint: String,
    pub interval: Duration,
    pub deadline: Duration,
    pub request_timeout: Duration,
}

impl PollSettings {
    pub fn with_endpoint(endpoint: String) -> Self {
        Self {
            endpoint,
            interval: Duration::from_secs(2),
            deadline: Duration::from_secs(300),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Poll the SEO status endpoint until the job completes, is reported gone,
/// or the hard deadline expires. Individual poll failures are swallowed and
/// the loop continues; only a definitive status or the deadline stops it.
/// `not_found` is a definitive negative, not a transient condition.
pub async fn poll_seo_until_terminal(
    client: &reqwest::Client,
    settings: &PollSettings,
    seo_session_id: &str,
) -> SeoPollOutcome {
    let started = Instant::now();
    let url = format!(
        "{}/{}",
        settings.endpoint.trim_end_matches('/'),
        seo_session_id
    );
    loop {
        if started.elapsed() >= settings.deadline {
            scout_info!("seo poll for {seo_session_id} abandoned after deadline");
            return SeoPollOutcome::TimedOut;
        }
        match poll_once(client, &url, settings.request_timeout).await {
            Ok(SeoStatusResponse {
                status: SeoStatus::Completed,
                data,
                ..
            }) => {
                return SeoPollOutcome::Completed(data.unwrap_or_default());
            }
            Ok(SeoStatusResponse {
                status: SeoStatus::NotFound,
                ..
            }) => {
                return SeoPollOutcome::NotFound;
            }
            Ok(_) => {}
            Err(reason) => {
                scout_warn!("seo poll for {seo_session_id} failed, retrying: {reason}");
            }
        }
        sleep(settings.interval).await;
    }
}

async fn poll_once(
    client: &reqwest::Client,
    url: &str,
    request_timeout: Duration,
) -> Result<SeoStatusResponse, String> {
    let response = client
        .get(url)
        .timeout(request_timeout)
        .send()
        .await
        .map_err(|err| err.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("http status {status}"));
    }
    response
        .json::<SeoStatusResponse>()
        .await
        .map_err(|err| err.to_string())
}
