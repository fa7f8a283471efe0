use std::time::Duration;

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scout_engine::{CancelClient, CancelError, CancelSettings};

fn settings(server: &MockServer) -> CancelSettings {
    CancelSettings {
        endpoint: format!("{}/cancel-analysis", server.uri()),
        request_timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn cancel_posts_the_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cancel-analysis"))
        .and(body_json(serde_json::json!({ "sessionId": "s-9" })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "{\"success\":true}",
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = CancelClient::new(settings(&server), reqwest::Client::new());
    client.cancel("s-9").await.expect("cancel ok");
}

#[tokio::test]
async fn failed_cancel_reports_an_error_for_logging_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cancel-analysis"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = CancelClient::new(settings(&server), reqwest::Client::new());
    let err = client.cancel("s-9").await.unwrap_err();

    assert!(matches!(err, CancelError::HttpStatus(500)));
}
