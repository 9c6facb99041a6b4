//! CLI entrypoint for the cfile conformance harness.

use std::path::PathBuf;

use cfile_harness::mode_table::mode_table;
use cfile_harness::structured_log::{LogEmitter, validate_log_file};
use cfile_harness::{HarnessConfig, ScenarioRunner};
use clap::{Parser, Subcommand};

/// Conformance tooling for cfile.
#[derive(Debug, Parser)]
#[command(name = "cfile-harness")]
#[command(about = "Conformance harness for the cfile stream wrapper")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dump every valid access-mode combination as JSON.
    Modes {
        /// Output JSON path (if omitted, prints to stdout).
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Run conformance scenarios against real files.
    Run {
        /// JSONL log path (if omitted, logs to stdout).
        #[arg(long)]
        log: Option<PathBuf>,
        /// Directory for scenario scratch files.
        #[arg(long)]
        scratch_dir: Option<PathBuf>,
        /// Only run scenarios whose name contains this substring.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Validate a JSONL log produced by `run`.
    ValidateLog {
        /// JSONL log path.
        #[arg(long)]
        log: PathBuf,
    },
}

fn run_id() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{secs}-{}", std::process::id())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Modes { output } => {
            let json = serde_json::to_string_pretty(&mode_table())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json + "\n")?;
                    eprintln!("Wrote mode table to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        Command::Run {
            log,
            scratch_dir,
            filter,
        } => {
            let config = HarnessConfig::resolve(scratch_dir, filter);
            let runner = ScenarioRunner::new(config);
            let run_id = run_id();
            let mut emitter = match &log {
                Some(path) => LogEmitter::to_file(path, &run_id)?,
                None => LogEmitter::to_stdout(&run_id),
            };

            let summary = runner.run(&mut emitter)?;
            for result in summary.results.iter().filter(|r| !r.passed) {
                eprintln!(
                    "FAIL {}: {}",
                    result.name,
                    result.reason.as_deref().unwrap_or("no reason recorded")
                );
            }
            eprintln!(
                "{} scenarios: {} passed, {} failed",
                summary.total, summary.passed, summary.failed
            );
            summary.into_result()?;
        }
        Command::ValidateLog { log } => {
            let (lines, errors) = validate_log_file(&log)?;
            for error in &errors {
                eprintln!("{error}");
            }
            if !errors.is_empty() {
                return Err(format!(
                    "{} validation errors in {} lines of {}",
                    errors.len(),
                    lines,
                    log.display()
                )
                .into());
            }
            eprintln!("{lines} lines valid in {}", log.display());
        }
    }

    Ok(())
}
