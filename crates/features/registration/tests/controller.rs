#![cfg(feature = "client")]

use serde_json::json;
use std::time::Duration;
use summit_registration::client::{
    DEFAULT_ACCEPTED_TEXT, FAILED_TEXT, Outcome, RELAY_ONLY_TEXT, RelayConfig, SENT_TEXT,
    SubmissionController, Tone, Url,
};
use tokio::time::Instant;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FUNCTION: &str = "/.netlify/functions/register";
const RELAY: &str = "/forms/d/abc/formResponse";

fn url(server: &MockServer, route: &str) -> Url {
    Url::parse(&format!("{}{route}", server.uri())).expect("mock url")
}

fn controller(endpoint: Url, relay: Option<RelayConfig>, delay: Duration) -> SubmissionController {
    let mut builder = SubmissionController::builder().endpoint(endpoint).settling_delay(delay);
    if let Some(relay) = relay {
        builder = builder.relay(relay);
    }

    let mut controller = builder.build().expect("controller");
    controller.set_field("name", "Ada");
    controller.set_field("college", "Girton");
    controller
}

async fn mount_primary(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(FUNCTION))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "name": "Ada", "college": "Girton" })))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn accepted_submission_shows_server_message_and_clears_form() {
    let server = MockServer::start().await;
    mount_primary(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "message": "See you at the summit!" })),
    )
    .await;

    let mut controller = controller(url(&server, FUNCTION), None, Duration::ZERO);
    let outcome = controller.submit().await;

    assert_eq!(outcome, Outcome::Accepted { message: "See you at the summit!".to_owned() });
    let view = controller.view();
    assert!(view.submit_enabled);
    assert!(view.values.is_empty());
    let status = view.status.expect("status shown");
    assert_eq!(status.text, "See you at the summit!");
    assert_eq!(status.tone, Tone::Success);
}

#[tokio::test]
async fn unusable_success_body_falls_back_to_default_text() {
    let server = MockServer::start().await;
    mount_primary(&server, ResponseTemplate::new(200).set_body_string("<html>ok</html>")).await;

    let mut controller = controller(url(&server, FUNCTION), None, Duration::ZERO);
    let outcome = controller.submit().await;

    assert_eq!(outcome, Outcome::Accepted { message: DEFAULT_ACCEPTED_TEXT.to_owned() });
    assert_eq!(controller.view().status.map(|s| s.text).as_deref(), Some(DEFAULT_ACCEPTED_TEXT));
}

#[tokio::test]
async fn rejected_submission_fails_and_keeps_values() {
    let server = MockServer::start().await;
    mount_primary(
        &server,
        ResponseTemplate::new(400).set_body_json(json!({ "message": "Missing required fields" })),
    )
    .await;

    let mut controller = controller(url(&server, FUNCTION), None, Duration::ZERO);
    let outcome = controller.submit().await;

    assert_eq!(outcome, Outcome::Failed);
    let view = controller.view();
    assert!(view.submit_enabled);
    assert_eq!(view.values.get("name"), Some("Ada"));
    assert_eq!(view.status.map(|s| (s.text, s.tone)), Some((FAILED_TEXT.to_owned(), Tone::Error)));
}

#[tokio::test]
async fn unreachable_endpoint_fails() {
    let endpoint = Url::parse("http://127.0.0.1:1/register").expect("url");
    let mut controller = controller(endpoint, None, Duration::ZERO);

    assert_eq!(controller.submit().await, Outcome::Failed);
    assert!(controller.view().submit_enabled);
    assert_eq!(controller.form().get("college"), Some("Girton"));
}

#[tokio::test]
async fn relay_with_failed_primary_reports_after_settling() {
    let server = MockServer::start().await;
    mount_primary(&server, ResponseTemplate::new(500)).await;
    Mock::given(method("POST"))
        .and(path(RELAY))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let delay = Duration::from_millis(300);
    let relay = RelayConfig::new(url(&server, RELAY)).entry("name", "entry.111");
    let mut controller = controller(url(&server, FUNCTION), Some(relay), delay);
    let mut views = controller.subscribe();

    let started = Instant::now();
    let task = tokio::spawn(async move {
        let outcome = controller.submit().await;
        (controller, outcome)
    });

    views.changed().await.expect("submitting view");
    {
        let view = views.borrow_and_update();
        assert!(!view.submit_enabled);
        assert!(view.status.is_none());
    }

    let (controller, outcome) = task.await.expect("submit task");
    assert!(started.elapsed() >= delay);
    assert_eq!(outcome, Outcome::RelayOnly);

    let view = controller.view();
    assert!(view.submit_enabled);
    assert_eq!(view.values.get("name"), Some("Ada"));
    assert_eq!(view.status.map(|s| (s.text, s.tone)), Some((RELAY_ONLY_TEXT.to_owned(), Tone::Warning)));
}

#[tokio::test]
async fn relay_with_accepted_primary_is_sent() {
    let server = MockServer::start().await;
    mount_primary(&server, ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" }))).await;
    Mock::given(method("POST"))
        .and(path(RELAY))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let relay = RelayConfig::new(url(&server, RELAY))
        .entry("name", "entry.111")
        .entry("college", "entry.222")
        .entry("email", "entry.333");
    let mut controller = controller(url(&server, FUNCTION), Some(relay), Duration::from_millis(200));

    assert_eq!(controller.submit().await, Outcome::Sent);
    let view = controller.view();
    assert!(view.values.is_empty());
    assert_eq!(view.status.map(|s| s.text).as_deref(), Some(SENT_TEXT));

    let requests = server.received_requests().await.expect("recording enabled");
    let relayed = requests.iter().find(|r| r.url.path() == RELAY).expect("relay request");
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(&relayed.body).into_owned().collect();

    assert!(pairs.contains(&("entry.111".to_owned(), "Ada".to_owned())));
    assert!(pairs.contains(&("entry.222".to_owned(), "Girton".to_owned())));
    assert!(pairs.contains(&("entry.333".to_owned(), String::new())));
    let timestamp = pairs.iter().find(|(k, _)| k == "timestamp").map(|(_, v)| v).expect("timestamp");
    assert!(timestamp.ends_with('Z'));
}

#[tokio::test]
async fn slow_relay_does_not_hold_up_the_outcome() {
    let server = MockServer::start().await;
    mount_primary(&server, ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" }))).await;
    Mock::given(method("POST"))
        .and(path(RELAY))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let delay = Duration::from_millis(200);
    let relay = RelayConfig::new(url(&server, RELAY)).entry("name", "entry.111");
    let mut controller = controller(url(&server, FUNCTION), Some(relay), delay);

    let started = Instant::now();
    let outcome = controller.submit().await;
    let elapsed = started.elapsed();

    assert_eq!(outcome, Outcome::Sent);
    assert!(elapsed >= delay, "settled too early: {elapsed:?}");
    assert!(elapsed < Duration::from_secs(2), "waited on the relay: {elapsed:?}");

    let view = controller.view();
    assert!(view.submit_enabled);
    assert!(view.values.is_empty());
    assert_eq!(view.status.map(|s| s.text).as_deref(), Some(SENT_TEXT));
}

#[tokio::test]
async fn dropped_submit_re_enables_the_control() {
    let server = MockServer::start().await;
    mount_primary(&server, ResponseTemplate::new(200).set_delay(Duration::from_secs(5))).await;

    let mut controller = controller(url(&server, FUNCTION), None, Duration::ZERO);
    let abandoned = tokio::time::timeout(Duration::from_millis(100), controller.submit()).await;

    assert!(abandoned.is_err());
    let view = controller.view();
    assert!(view.submit_enabled);
    assert!(view.status.is_none());
    assert_eq!(view.values.get("name"), Some("Ada"));
}

#[test]
fn form_edits_publish_a_single_view() {
    let endpoint = Url::parse("http://127.0.0.1:1/register").expect("url");
    let mut controller = SubmissionController::builder().endpoint(endpoint).build().expect("controller");
    let mut views = controller.subscribe();

    {
        let mut form = controller.form_mut();
        form.set("name", "Ada");
        form.set("college", "Girton");
        assert!(!views.has_changed().expect("controller alive"));
    }

    assert!(views.has_changed().expect("controller alive"));
    let view = views.borrow_and_update();
    assert_eq!(view.values.len(), 2);
    assert!(view.submit_enabled);
}
