//! # Scenario Model
//!
//! A scenario is one test case's fixed input: method, path, query
//! parameters, body, headers, and the assertions to evaluate against the
//! echoed response. Scenarios are built once and never mutated afterwards;
//! the suite shares nothing between them.

use serde_json::Value;

use crate::checks::Assertion;
use crate::error::CheckError;
use crate::http::method::HttpMethod;

/// Request body of a scenario.
#[derive(Debug, Clone)]
pub enum RequestBody {
    None,
    Json(Value),
    Form(Vec<(String, String)>),
}

/// One test case's fixed input, plus its expectations.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    /// Query parameters in insertion order; ordering is significant because
    /// the echoed `url` field is compared against a deterministic re-encode.
    pub params: Vec<(String, String)>,
    pub body: RequestBody,
    pub headers: Vec<(String, String)>,
    pub expected_status: u16,
    /// Whether to assert that the echoed `url` field equals the re-encoded
    /// request URL. Disabled for scenarios with non-ASCII-safe parameters.
    pub check_url: bool,
    pub assertions: Vec<Assertion>,
}

impl Scenario {
    pub fn new(name: &str, method: HttpMethod, path: &str) -> Self {
        Self {
            name: name.to_string(),
            method,
            path: path.to_string(),
            params: Vec::new(),
            body: RequestBody::None,
            headers: Vec::new(),
            expected_status: 200,
            check_url: true,
            assertions: Vec::new(),
        }
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.params.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json_body(mut self, value: Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    pub fn form_field(mut self, key: &str, value: &str) -> Self {
        if let RequestBody::Form(fields) = &mut self.body {
            fields.push((key.to_string(), value.to_string()));
        } else {
            self.body = RequestBody::Form(vec![(key.to_string(), value.to_string())]);
        }
        self
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn skip_url_check(mut self) -> Self {
        self.check_url = false;
        self
    }

    pub fn assert(mut self, assertion: Assertion) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Builds the request URL: `{base_url}{path}` with the query parameters
    /// appended in insertion order using standard form encoding (space
    /// becomes `+`). The client sends exactly this URL, so the expected
    /// `url` assertion and the actual request agree by construction.
    pub fn request_url(&self, base_url: &str) -> Result<reqwest::Url, CheckError> {
        let raw = format!("{}{}", base_url.trim_end_matches('/'), self.path);
        let mut url =
            reqwest::Url::parse(&raw).map_err(|e| CheckError::InvalidUrl(format!("{raw}: {e}")))?;

        if !self.params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                query_pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    /// The URL string the echo service is expected to report back.
    pub fn expected_url(&self, base_url: &str) -> Result<String, CheckError> {
        Ok(self.request_url(base_url)?.to_string())
    }
}
