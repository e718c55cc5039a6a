//! Core library for the `echoman` CLI.
//!
//! This crate provides the building blocks used by the binary: the scenario
//! data model, the blocking HTTP client, response assertions, the sequential
//! suite runner, and report rendering. The primary user-facing interface is
//! the `echoman` command-line application.

pub mod checks;
pub mod cli;
pub mod error;
pub mod http;
pub mod report;
pub mod runner;
pub mod scenario;
pub mod suite;
