use std::time::{Duration, Instant};

use reqwest::header::{HeaderName, HeaderValue};
use tracing::debug;

use crate::error::CheckError;
use crate::scenario::{RequestBody, Scenario};

use super::response::EchoResponse;

/// Sends exactly one blocking request for the given scenario and decodes
/// the response body as JSON. A fresh client is built per call; there is no
/// pooling or retrying, and the call blocks until the response arrives or
/// the timeout elapses.
pub fn send(base_url: &str, scenario: &Scenario, timeout: Duration) -> Result<EchoResponse, CheckError> {
    let url = scenario.request_url(base_url)?;

    let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;
    let mut req_builder = client.request(scenario.method.into(), url.clone());
    req_builder = apply_headers(req_builder, &scenario.headers)?;

    match &scenario.body {
        RequestBody::None => {}
        RequestBody::Json(value) => req_builder = req_builder.json(value),
        RequestBody::Form(fields) => req_builder = req_builder.form(fields),
    }

    debug!(method = %scenario.method, url = %url, "sending request");
    let started = Instant::now();
    let response = req_builder.send()?;
    let elapsed = started.elapsed().as_millis();

    let status = response.status().as_u16();
    let raw = response.text()?;
    debug!(status, elapsed_ms = elapsed as u64, bytes = raw.len(), "response received");

    let body = serde_json::from_str(&raw).map_err(CheckError::Parse)?;

    Ok(EchoResponse { status, body, raw })
}

fn apply_headers(
    mut req_builder: reqwest::blocking::RequestBuilder,
    headers: &[(String, String)],
) -> Result<reqwest::blocking::RequestBuilder, CheckError> {
    for (key, value) in headers {
        let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| CheckError::Header {
            name: key.clone(),
            reason: e.to_string(),
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| CheckError::Header {
            name: key.clone(),
            reason: e.to_string(),
        })?;
        req_builder = req_builder.header(header_name, header_value);
    }

    Ok(req_builder)
}
