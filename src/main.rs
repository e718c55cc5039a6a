use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use echoman::cli::{Cli, OutputFormat};
use echoman::report;
use echoman::runner::{RunnerConfig, run_suite};
use echoman::suite;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut scenarios = match suite::echo_contract_suite(&cli.base_url) {
        Ok(scenarios) => scenarios,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    if let Some(filter) = &cli.filter {
        scenarios.retain(|scenario| scenario.name.contains(filter.as_str()));
    }

    let config = RunnerConfig {
        base_url: cli.base_url.clone(),
        timeout: Duration::from_secs(cli.timeout),
    };
    let run_report = run_suite(&config, &scenarios);

    match cli.output {
        OutputFormat::Text => print!("{}", run_report.render_text(cli.verbose)),
        OutputFormat::Json => match run_report.render_json() {
            Ok(raw) => println!("{raw}"),
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::from(2);
            }
        },
    }

    if let Some(path) = &cli.report {
        if let Err(err) = report::write_json_report(&run_report, path) {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    }

    if run_report.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
