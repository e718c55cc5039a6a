//! # Run Reports
//!
//! Per-scenario outcomes and the final suite report, with a human-readable
//! text rendering and a machine-readable JSON rendering for CI.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::checks::AssertionResult;

/// The request a scenario actually sent, kept for diagnostics output.
#[derive(Debug, Clone, Serialize)]
pub struct RequestSnapshot {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
}

/// The response a scenario received, kept for diagnostics output.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseSnapshot {
    pub status: u16,
    pub body: Value,
}

/// Outcome of one scenario: either an error before assertions could run
/// (network or parse failure), or the evaluated assertion results.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub passed: bool,
    pub duration_ms: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub assertions: Vec<AssertionResult>,
    pub request: RequestSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<ResponseSnapshot>,
}

/// Summary report for a full suite run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub duration_ms: u128,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl RunReport {
    pub fn new(outcomes: Vec<ScenarioOutcome>, duration: Duration) -> Self {
        let total = outcomes.len();
        let passed = outcomes.iter().filter(|o| o.passed).count();
        Self {
            total,
            passed,
            failed: total - passed,
            duration_ms: duration.as_millis(),
            outcomes,
        }
    }

    /// True when no scenario failed; drives the process exit code.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Human-readable per-scenario pass/fail output. Request and response
    /// payloads are printed for failing scenarios, or for every scenario
    /// when `verbose` is set.
    pub fn render_text(&self, verbose: bool) -> String {
        let mut out = String::new();

        for outcome in &self.outcomes {
            let status = if outcome.passed { "PASS" } else { "FAIL" };
            let _ = writeln!(
                out,
                "{status} {} ({} {}) in {} ms",
                outcome.name, outcome.request.method, outcome.request.url, outcome.duration_ms
            );

            if let Some(error) = &outcome.error {
                let _ = writeln!(out, "  error: {error}");
            }

            for result in &outcome.assertions {
                if !result.passed {
                    let _ = writeln!(out, "  failed {}: {}", result.assertion.target, result.message);
                } else if verbose {
                    let _ = writeln!(out, "  ok {}", result.assertion.target);
                }
            }

            if !outcome.passed || verbose {
                if let Some(body) = &outcome.request.body {
                    let _ = writeln!(out, "  request body: {}", pretty(body));
                }
                if let Some(response) = &outcome.response {
                    let _ = writeln!(out, "  response status: {}", response.status);
                    let _ = writeln!(out, "  response body: {}", pretty(&response.body));
                }
            }
        }

        let _ = writeln!(
            out,
            "{} scenarios: {} passed, {} failed in {} ms",
            self.total, self.passed, self.failed, self.duration_ms
        );
        out
    }

    pub fn render_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize report: {e}"))
    }
}

pub fn write_json_report(report: &RunReport, path: &Path) -> Result<(), String> {
    let raw = report.render_json()?;
    fs::write(path, raw).map_err(|e| format!("Failed to write report file `{}`: {e}", path.display()))
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
