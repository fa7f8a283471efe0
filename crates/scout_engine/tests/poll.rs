use std::time::Duration;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scout_engine::{poll_seo_until_terminal, PollSettings, SeoPollOutcome};

fn fast_settings(server: &MockServer) -> PollSettings {
    PollSettings {
        endpoint: format!("{}/seo-status", server.uri()),
        interval: Duration::from_millis(10),
        deadline: Duration::from_secs(2),
        request_timeout: Duration::from_secs(1),
    }
}

fn running_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        "{\"success\":true,\"status\":\"running\"}",
        "application/json",
    )
}

fn completed_body() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        "{\"success\":true,\"status\":\"completed\",\"data\":{\"score\":91,\"issues\":[{\"severity\":\"error\",\"message\":\"missing title\"}]}}",
        "application/json",
    )
}

#[tokio::test]
async fn polling_continues_through_running_until_completed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/seo-status/seo-1"))
        .respond_with(running_body())
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/seo-status/seo-1"))
        .respond_with(completed_body())
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let outcome = poll_seo_until_terminal(&client, &fast_settings(&server), "seo-1").await;

    match outcome {
        SeoPollOutcome::Completed(report) => {
            assert_eq!(report.score, 91);
            assert_eq!(report.issues.len(), 1);
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test]
async fn not_found_stops_polling_immediately() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/seo-status/seo-2"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "{\"success\":false,\"status\":\"not_found\"}",
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let outcome = poll_seo_until_terminal(&client, &fast_settings(&server), "seo-2").await;

    assert_eq!(outcome, SeoPollOutcome::NotFound);
}

#[tokio::test]
async fn single_poll_failure_does_not_stop_the_loop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/seo-status/seo-3"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/seo-status/seo-3"))
        .respond_with(completed_body())
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let outcome = poll_seo_until_terminal(&client, &fast_settings(&server), "seo-3").await;

    assert!(matches!(outcome, SeoPollOutcome::Completed(_)));
}

#[tokio::test]
async fn deadline_abandons_a_job_stuck_in_running() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/seo-status/seo-4"))
        .respond_with(running_body())
        .mount(&server)
        .await;

    let settings = PollSettings {
        deadline: Duration::from_millis(60),
        ..fast_settings(&server)
    };
    let client = reqwest::Client::new();
    let outcome = poll_seo_until_terminal(&client, &settings, "seo-4").await;

    assert_eq!(outcome, SeoPollOutcome::TimedOut);
}
