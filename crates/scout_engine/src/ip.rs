use scout_logging::scout_debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct IpResponse {
    ip: String,
}

/// Fetch the public IP used to enrich the analysis request. Failure is
/// non-fatal: the `userIP` parameter is simply omitted.
pub async fn lookup_public_ip(client: &reqwest::Client, endpoint: &str) -> Option<String> {
    match client.get(endpoint).send().await {
        Ok(response) if response.status().is_success() => {
            match response.json::<IpResponse>().await {
                Ok(body) => Some(body.ip),
                Err(err) => {
                    scout_debug!("ip lookup parse failed: {err}");
                    None
                }
            }
        }
        Ok(response) => {
            scout_debug!("ip lookup returned {}", response.status());
            None
        }
        Err(err) => {
            scout_debug!("ip lookup failed: {err}");
            None
        }
    }
}
