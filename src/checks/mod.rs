//! # Response Assertions
//!
//! Assertions evaluated against a decoded echo response: the status code or
//! a dot-path into the JSON body (`args.name`, `headers.content-type`,
//! `json.fields.name`). Values are compared exactly as JSON values, so
//! floats, booleans, nulls, Unicode, and reserved characters must survive
//! the round trip without normalization or coercion.

use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::Value;

use crate::http::response::EchoResponse;

/// Target of an assertion within the echo response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AssertionTarget {
    StatusCode,
    /// Dot-path into the decoded JSON body.
    Body(String),
}

impl Display for AssertionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionTarget::StatusCode => write!(f, "status"),
            AssertionTarget::Body(path) => write!(f, "{path}"),
        }
    }
}

/// Comparison applied to the resolved target value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AssertionOperator {
    Equals(Value),
    Contains(String),
    Exists,
}

/// A single assertion that can be evaluated against a response.
#[derive(Debug, Clone, Serialize)]
pub struct Assertion {
    pub target: AssertionTarget,
    pub operator: AssertionOperator,
}

/// Result of evaluating an assertion, with an expected-vs-actual message
/// when it fails.
#[derive(Debug, Clone, Serialize)]
pub struct AssertionResult {
    pub assertion: Assertion,
    pub passed: bool,
    pub actual: String,
    pub message: String,
}

impl Assertion {
    pub fn status_equals(status: u16) -> Self {
        Self {
            target: AssertionTarget::StatusCode,
            operator: AssertionOperator::Equals(Value::from(status)),
        }
    }

    pub fn body_equals(path: &str, expected: impl Into<Value>) -> Self {
        Self {
            target: AssertionTarget::Body(path.to_string()),
            operator: AssertionOperator::Equals(expected.into()),
        }
    }

    pub fn body_contains(path: &str, needle: &str) -> Self {
        Self {
            target: AssertionTarget::Body(path.to_string()),
            operator: AssertionOperator::Contains(needle.to_string()),
        }
    }

    pub fn body_has(path: &str) -> Self {
        Self {
            target: AssertionTarget::Body(path.to_string()),
            operator: AssertionOperator::Exists,
        }
    }

    pub fn evaluate(&self, response: &EchoResponse) -> AssertionResult {
        let actual = match &self.target {
            AssertionTarget::StatusCode => Some(Value::from(response.status)),
            AssertionTarget::Body(path) => lookup(&response.body, path).cloned(),
        };

        let (passed, message) = match (&self.operator, &actual) {
            (AssertionOperator::Exists, Some(_)) => (true, "present".to_string()),
            (_, None) => (false, format!("`{}` is missing from the response", self.target)),
            (AssertionOperator::Equals(expected), Some(actual)) => {
                if actual == expected {
                    (true, "matched".to_string())
                } else {
                    (false, format!("expected `{expected}`, got `{actual}`"))
                }
            }
            (AssertionOperator::Contains(needle), Some(actual)) => match actual.as_str() {
                Some(s) if s.contains(needle) => (true, "matched".to_string()),
                Some(s) => (false, format!("expected `{s}` to contain `{needle}`")),
                None => (false, format!("expected a string at `{}`, got `{actual}`", self.target)),
            },
        };

        AssertionResult {
            assertion: self.clone(),
            passed,
            actual: actual.map(|v| v.to_string()).unwrap_or_else(|| "<missing>".to_string()),
            message,
        }
    }
}

/// Walks a dot-separated path through nested JSON objects.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
