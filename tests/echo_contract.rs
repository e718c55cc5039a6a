//! Runs the contract suite against a local echo responder so the tests do
//! not depend on the availability of the public echo service.

use std::time::Duration;

use serde_json::{Map, Value, json};
use wiremock::matchers::any;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use echoman::checks::Assertion;
use echoman::http::method::HttpMethod;
use echoman::runner::{RunnerConfig, run_scenario, run_suite};
use echoman::scenario::Scenario;
use echoman::suite;

/// Mirrors the request back the way the public echo service does: query
/// parameters in `args`, lowercased header names in `headers`, the parsed
/// JSON body in `json`, the raw body in `data`, URL-encoded form fields in
/// `form`, and the full request URL (reconstructed from the Host header and
/// the raw path-and-query) in `url`.
struct EchoResponder;

impl Respond for EchoResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut args = Map::new();
        for (key, value) in request.url.query_pairs() {
            args.insert(key.into_owned(), Value::String(value.into_owned()));
        }

        let mut headers = Map::new();
        for (name, value) in request.headers.iter() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_string(), Value::String(value.to_string()));
            }
        }

        let host = headers.get("host").and_then(Value::as_str).unwrap_or_default();
        let path_and_query = match request.url.query() {
            Some(query) => format!("{}?{}", request.url.path(), query),
            None => request.url.path().to_string(),
        };
        let url = format!("http://{host}{path_and_query}");

        let data = String::from_utf8_lossy(&request.body).into_owned();
        let json_body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);

        let content_type = headers.get("content-type").and_then(Value::as_str).unwrap_or_default();
        let mut form = Map::new();
        if content_type.starts_with("application/x-www-form-urlencoded") {
            for (key, value) in url::form_urlencoded::parse(&request.body) {
                form.insert(key.into_owned(), Value::String(value.into_owned()));
            }
        }

        ResponseTemplate::new(200).set_body_json(json!({
            "args": args,
            "data": data,
            "files": {},
            "form": form,
            "headers": headers,
            "json": json_body,
            "url": url,
        }))
    }
}

async fn start_echo_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(any()).respond_with(EchoResponder).mount(&server).await;
    server
}

fn config(base_url: &str) -> RunnerConfig {
    RunnerConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(10),
    }
}

#[tokio::test]
async fn full_suite_passes_against_local_echo() {
    let server = start_echo_server().await;
    let base = server.uri();

    let report = tokio::task::spawn_blocking(move || {
        let scenarios = suite::echo_contract_suite(&base).expect("suite should build");
        run_suite(&config(&base), &scenarios)
    })
    .await
    .expect("runner thread panicked");

    assert_eq!(report.total, 7);
    assert_eq!(report.failed, 0);
    assert!(report.all_passed(), "failures:\n{}", report.render_text(false));
}

#[tokio::test]
async fn echoed_url_matches_deterministic_reencode() {
    let server = start_echo_server().await;
    let base = server.uri();

    let outcome = tokio::task::spawn_blocking(move || {
        let scenario = Scenario::new("url reencode", HttpMethod::Get, "/get")
            .param("city", "New York")
            .param("q", "a b");
        run_scenario(&config(&base), &scenario)
    })
    .await
    .unwrap();

    assert!(outcome.passed, "{outcome:?}");
    assert!(outcome.request.url.ends_with("/get?city=New+York&q=a+b"));
}

#[tokio::test]
async fn json_body_round_trips_deep_equal() {
    let server = start_echo_server().await;
    let base = server.uri();

    let body = json!({
        "active": true,
        "balance": 1500.75,
        "tags": ["a", "b"],
        "nested": {"empty": null, "n": 456}
    });

    let outcome = tokio::task::spawn_blocking(move || {
        let scenario = Scenario::new("json round trip", HttpMethod::Post, "/post")
            .json_body(body.clone())
            .assert(Assertion::body_equals("json", body))
            .assert(Assertion::body_contains("headers.content-type", "application/json"));
        run_scenario(&config(&base), &scenario)
    })
    .await
    .unwrap();

    assert!(outcome.passed, "{outcome:?}");
}

#[tokio::test]
async fn form_body_round_trips_without_coercion() {
    let server = start_echo_server().await;
    let base = server.uri();

    let outcome = tokio::task::spawn_blocking(move || {
        let scenario = Scenario::new("form round trip", HttpMethod::Post, "/post")
            .form_field("subscribe", "true")
            .form_field("count", "30")
            .form_field("note", "a & b")
            .assert(Assertion::body_equals(
                "form",
                json!({"subscribe": "true", "count": "30", "note": "a & b"}),
            ));
        run_scenario(&config(&base), &scenario)
    })
    .await
    .unwrap();

    assert!(outcome.passed, "{outcome:?}");
}

#[tokio::test]
async fn special_characters_survive_in_args() {
    let server = start_echo_server().await;
    let base = server.uri();

    let outcome = tokio::task::spawn_blocking(move || {
        let scenario = Scenario::new("special characters", HttpMethod::Get, "/get")
            .skip_url_check()
            .param("search", "test & data")
            .param("price", "100$")
            .param("unicode", "тест русский текст")
            .assert(Assertion::body_equals("args.search", "test & data"))
            .assert(Assertion::body_equals("args.price", "100$"))
            .assert(Assertion::body_equals("args.unicode", "тест русский текст"));
        run_scenario(&config(&base), &scenario)
    })
    .await
    .unwrap();

    assert!(outcome.passed, "{outcome:?}");
}

#[tokio::test]
async fn assertion_failure_is_isolated_to_its_scenario() {
    let server = start_echo_server().await;
    let base = server.uri();

    let report = tokio::task::spawn_blocking(move || {
        let scenarios = vec![
            Scenario::new("mismatch", HttpMethod::Get, "/get")
                .param("name", "John")
                .assert(Assertion::body_equals("args.name", "Jane")),
            Scenario::new("fine", HttpMethod::Get, "/get")
                .param("name", "John")
                .assert(Assertion::body_equals("args.name", "John")),
        ];
        run_suite(&config(&base), &scenarios)
    })
    .await
    .unwrap();

    assert_eq!(report.total, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.passed, 1);

    let mismatch = &report.outcomes[0];
    assert!(!mismatch.passed);
    let failed = mismatch.assertions.iter().find(|r| !r.passed).unwrap();
    assert!(failed.message.contains("expected `\"Jane\"`, got `\"John\"`"));
}

#[tokio::test]
async fn non_json_response_fails_without_crashing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("pong"))
        .mount(&server)
        .await;
    let base = server.uri();

    let report = tokio::task::spawn_blocking(move || {
        let scenarios = vec![Scenario::new("not json", HttpMethod::Get, "/get")];
        run_suite(&config(&base), &scenarios)
    })
    .await
    .unwrap();

    assert_eq!(report.failed, 1);
    let outcome = &report.outcomes[0];
    assert!(outcome.error.as_deref().unwrap().contains("not valid JSON"));
    assert!(outcome.response.is_none());
}

#[tokio::test]
async fn network_error_fails_scenario_and_suite_continues() {
    // Bind to an ephemeral port and release it so connections are refused.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let base = format!("http://127.0.0.1:{port}");

    let report = tokio::task::spawn_blocking(move || {
        let scenarios = vec![
            Scenario::new("unreachable a", HttpMethod::Get, "/get"),
            Scenario::new("unreachable b", HttpMethod::Delete, "/delete"),
        ];
        run_suite(&config(&base), &scenarios)
    })
    .await
    .unwrap();

    assert_eq!(report.total, 2, "suite must continue past a network failure");
    assert_eq!(report.failed, 2);
    for outcome in &report.outcomes {
        assert!(outcome.error.as_deref().unwrap().contains("request failed"));
        assert!(outcome.assertions.is_empty());
    }
}

#[tokio::test]
async fn scenario_specific_expected_status_is_honored() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(418).set_body_json(json!({"args": {}})))
        .mount(&server)
        .await;
    let base = server.uri();

    let report = tokio::task::spawn_blocking(move || {
        let scenarios = vec![
            Scenario::new("teapot ok", HttpMethod::Get, "/get")
                .skip_url_check()
                .expect_status(418),
            Scenario::new("teapot surprising", HttpMethod::Get, "/get").skip_url_check(),
        ];
        run_suite(&config(&base), &scenarios)
    })
    .await
    .unwrap();

    assert!(report.outcomes[0].passed, "{:?}", report.outcomes[0]);
    assert!(!report.outcomes[1].passed);
    let failed = report.outcomes[1].assertions.iter().find(|r| !r.passed).unwrap();
    assert!(failed.message.contains("expected `200`, got `418`"));
}
