//! # Suite Runner
//!
//! Runs scenarios strictly sequentially against a fixed base URL. Each
//! scenario sends exactly one request; network failures, non-JSON bodies,
//! and assertion mismatches all fail that scenario only, and the run always
//! continues with the remaining scenarios.

use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use tracing::debug;

use crate::checks::Assertion;
use crate::http::client;
use crate::report::{RequestSnapshot, ResponseSnapshot, RunReport, ScenarioOutcome};
use crate::scenario::{RequestBody, Scenario};

pub struct RunnerConfig {
    pub base_url: String,
    pub timeout: Duration,
}

pub fn run_suite(config: &RunnerConfig, scenarios: &[Scenario]) -> RunReport {
    let started = Instant::now();
    let outcomes = scenarios.iter().map(|scenario| run_scenario(config, scenario)).collect();
    RunReport::new(outcomes, started.elapsed())
}

pub fn run_scenario(config: &RunnerConfig, scenario: &Scenario) -> ScenarioOutcome {
    let started = Instant::now();
    debug!(name = %scenario.name, "running scenario");

    let request = request_snapshot(config, scenario);

    match client::send(&config.base_url, scenario, config.timeout) {
        Ok(response) => {
            let mut results = vec![Assertion::status_equals(scenario.expected_status).evaluate(&response)];

            if scenario.check_url {
                // request_url succeeded inside the client, so this cannot fail
                // with a different answer; re-encode and compare.
                if let Ok(expected) = scenario.expected_url(&config.base_url) {
                    results.push(Assertion::body_equals("url", expected).evaluate(&response));
                }
            }

            for assertion in &scenario.assertions {
                results.push(assertion.evaluate(&response));
            }

            let passed = results.iter().all(|r| r.passed);
            ScenarioOutcome {
                name: scenario.name.clone(),
                passed,
                duration_ms: started.elapsed().as_millis(),
                error: None,
                assertions: results,
                request,
                response: Some(ResponseSnapshot {
                    status: response.status,
                    body: response.body,
                }),
            }
        }
        Err(err) => {
            debug!(name = %scenario.name, error = %err, "scenario errored");
            ScenarioOutcome {
                name: scenario.name.clone(),
                passed: false,
                duration_ms: started.elapsed().as_millis(),
                error: Some(err.to_string()),
                assertions: Vec::new(),
                request,
                response: None,
            }
        }
    }
}

fn request_snapshot(config: &RunnerConfig, scenario: &Scenario) -> RequestSnapshot {
    let url = scenario
        .expected_url(&config.base_url)
        .unwrap_or_else(|_| format!("{}{}", config.base_url, scenario.path));

    let body = match &scenario.body {
        RequestBody::None => None,
        RequestBody::Json(value) => Some(value.clone()),
        RequestBody::Form(fields) => {
            let map: Map<String, Value> = fields
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect();
            Some(Value::Object(map))
        }
    };

    RequestSnapshot {
        method: scenario.method.to_string(),
        url,
        body,
    }
}
