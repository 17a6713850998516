use clap::Parser;
use serde_json::json;
use summit::client::{FAILED_TEXT, Outcome, RELAY_ONLY_TEXT};
use summit_shell::args::{Cli, Commands, SubmitArgs};
use summit_shell::submit;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn submit_args(args: &[&str]) -> SubmitArgs {
    let argv = ["summit", "submit"].iter().chain(args).copied();
    let Commands::Submit(args) = Cli::try_parse_from(argv).expect("arguments").command;
    args
}

async fn run(args: SubmitArgs) -> (Outcome, String) {
    let mut out = Vec::new();
    let outcome = submit::run(args, &mut out).await.expect("submit");
    (outcome, String::from_utf8(out).expect("utf-8"))
}

#[tokio::test]
async fn relative_endpoint_resolves_against_site() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/.netlify/functions/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Welcome!" })))
        .expect(1)
        .mount(&server)
        .await;

    let site = server.uri();
    let (outcome, printed) = run(submit_args(&["--site", &site, "name=Ada", "college=Girton"])).await;

    assert_eq!(outcome, Outcome::Accepted { message: "Welcome!".to_owned() });
    assert_eq!(printed, "Welcome!\n");
}

#[tokio::test]
async fn relay_only_is_reported_as_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/formResponse"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let endpoint = format!("{}/register", server.uri());
    let relay = format!("{}/formResponse", server.uri());
    let (outcome, printed) = run(submit_args(&[
        "--endpoint",
        &endpoint,
        "--relay",
        &relay,
        "--entry",
        "name=entry.1",
        "--settle-ms",
        "50",
        "--watch",
        "name=Ada",
    ]))
    .await;

    assert_eq!(outcome, Outcome::RelayOnly);
    assert!(!outcome.primary_succeeded());
    assert_eq!(printed.trim_end(), RELAY_ONLY_TEXT);
}

#[tokio::test]
async fn timeout_turns_a_slow_endpoint_into_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(5)))
        .mount(&server)
        .await;

    let endpoint = format!("{}/register", server.uri());
    let (outcome, printed) =
        run(submit_args(&["--endpoint", &endpoint, "--timeout", "1", "name=Ada", "college=G"])).await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(printed.trim_end(), FAILED_TEXT);
}

#[tokio::test]
async fn invalid_site_is_an_error() {
    let mut out = Vec::new();
    let result = submit::run(submit_args(&["--site", "not a url", "name=Ada"]), &mut out).await;

    assert!(result.is_err());
    assert!(out.is_empty());
}
