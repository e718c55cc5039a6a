//! # Built-in Echo Contract Suite
//!
//! The scenarios verified against the echo service: basic GET, query
//! parameter echo, JSON and form body echo, PUT, DELETE, and a
//! special-character round trip. Each scenario is independent; the only
//! shared input is the base URL.

use serde_json::json;

use crate::checks::Assertion;
use crate::error::CheckError;
use crate::http::method::HttpMethod;
use crate::scenario::Scenario;

pub const DEFAULT_BASE_URL: &str = "https://postman-echo.com";

/// Builds the full contract suite for the given base URL.
pub fn echo_contract_suite(base_url: &str) -> Result<Vec<Scenario>, CheckError> {
    let host = host_header(base_url)?;

    Ok(vec![
        basic_get(&host),
        get_with_query_parameters(),
        post_with_json_body(),
        post_with_form_data(),
        put_with_json_body(),
        delete_request(),
        get_with_special_characters(),
    ])
}

fn basic_get(host: &str) -> Scenario {
    Scenario::new("basic get", HttpMethod::Get, "/get")
        .assert(Assertion::body_has("args"))
        .assert(Assertion::body_has("headers"))
        .assert(Assertion::body_has("url"))
        .assert(Assertion::body_equals("args", json!({})))
        .assert(Assertion::body_equals("headers.host", host))
}

fn get_with_query_parameters() -> Scenario {
    Scenario::new("get with query parameters", HttpMethod::Get, "/get")
        .param("name", "John")
        .param("age", "30")
        .param("city", "New York")
        .param("is_active", "true")
        .assert(Assertion::body_equals("args.name", "John"))
        .assert(Assertion::body_equals("args.age", "30"))
        .assert(Assertion::body_equals("args.city", "New York"))
        .assert(Assertion::body_equals("args.is_active", "true"))
}

fn post_with_json_body() -> Scenario {
    let body = json!({
        "user": "test_user",
        "password": "secure_password_123",
        "active": true,
        "roles": ["admin", "editor", "viewer"],
        "metadata": {
            "created_at": "2024-01-15",
            "last_login": null
        },
        "balance": 1500.75
    });

    Scenario::new("post with json body", HttpMethod::Post, "/post")
        .json_body(body.clone())
        .assert(Assertion::body_has("json"))
        .assert(Assertion::body_has("data"))
        .assert(Assertion::body_has("headers"))
        .assert(Assertion::body_equals("json", body))
        .assert(Assertion::body_contains("headers.content-type", "application/json"))
}

fn post_with_form_data() -> Scenario {
    Scenario::new("post with form data", HttpMethod::Post, "/post")
        .form_field("username", "jane_doe")
        .form_field("email", "jane@example.com")
        .form_field("subscribe", "true")
        .form_field("newsletter_frequency", "weekly")
        .form_field("interests", "technology,sports,music")
        .assert(Assertion::body_has("form"))
        .assert(Assertion::body_has("files"))
        .assert(Assertion::body_equals(
            "form",
            json!({
                "username": "jane_doe",
                "email": "jane@example.com",
                "subscribe": "true",
                "newsletter_frequency": "weekly",
                "interests": "technology,sports,music"
            }),
        ))
        .assert(Assertion::body_contains(
            "headers.content-type",
            "application/x-www-form-urlencoded",
        ))
}

fn put_with_json_body() -> Scenario {
    Scenario::new("put with json body", HttpMethod::Put, "/put")
        .json_body(json!({
            "id": 456,
            "action": "update",
            "fields": {
                "name": "Updated Name",
                "status": "active"
            }
        }))
        .assert(Assertion::body_equals("json.id", 456))
        .assert(Assertion::body_equals("json.action", "update"))
        .assert(Assertion::body_equals("json.fields.name", "Updated Name"))
}

fn delete_request() -> Scenario {
    Scenario::new("delete request", HttpMethod::Delete, "/delete")
        .assert(Assertion::body_has("args"))
        .assert(Assertion::body_has("headers"))
}

fn get_with_special_characters() -> Scenario {
    // Reserved and non-ASCII parameters; the echoed url is not compared
    // because the property only holds for ASCII-safe parameters.
    Scenario::new("get with special characters", HttpMethod::Get, "/get")
        .skip_url_check()
        .param("search", "test & data")
        .param("price", "100$")
        .param("email", "test@example.com")
        .param("message", "Hello, World!")
        .param("unicode", "тест русский текст")
        .assert(Assertion::body_equals("args.search", "test & data"))
        .assert(Assertion::body_equals("args.price", "100$"))
        .assert(Assertion::body_equals("args.email", "test@example.com"))
        .assert(Assertion::body_equals("args.message", "Hello, World!"))
        .assert(Assertion::body_equals("args.unicode", "тест русский текст"))
}

/// The Host header value the echo service should report for a base URL:
/// the host name, with the port appended when it is not the scheme default.
fn host_header(base_url: &str) -> Result<String, CheckError> {
    let url = reqwest::Url::parse(base_url)
        .map_err(|e| CheckError::InvalidUrl(format!("{base_url}: {e}")))?;
    let host = url
        .host_str()
        .ok_or_else(|| CheckError::InvalidUrl(format!("{base_url}: missing host")))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
