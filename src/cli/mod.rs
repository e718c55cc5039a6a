//! # CLI Surface
//!
//! Command-line interface for running the contract suite in CI pipelines:
//! exit code 0 when every scenario passes, 1 otherwise, with text or JSON
//! report output and an optional report file.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::suite::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "echoman", about = "Contract checks for HTTP echo services", version)]
pub struct Cli {
    /// Base URL of the echo service
    #[arg(long, env = "ECHOMAN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Only run scenarios whose name contains this substring
    #[arg(long)]
    pub filter: Option<String>,

    /// Report output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    /// Write the JSON report to a file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Print request/response payloads for passing scenarios too
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
