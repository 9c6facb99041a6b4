#![cfg(target_os = "linux")]
//! Integration test: every scenario passes against the real C library.
//!
//! All scenarios run from a single test so descriptor-tracking checks never
//! race with another test in this binary.
//!
//! Run: cargo test -p cfile-harness --test runner_test

use cfile_harness::structured_log::{LogEmitter, validate_log_line};
use cfile_harness::{HarnessConfig, ScenarioRunner, scenarios};

#[test]
fn all_scenarios_pass_and_log_outcomes() {
    let scratch = std::env::temp_dir().join(format!("cfile-runner-{}", std::process::id()));
    std::fs::create_dir_all(&scratch).unwrap();

    let runner = ScenarioRunner::new(HarnessConfig {
        scratch_dir: scratch.clone(),
        filter: None,
    });
    let mut log = LogEmitter::to_buffer("runner-test");
    let summary = runner.run(&mut log).unwrap();

    let failures: Vec<_> = summary
        .results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| format!("{}: {}", r.name, r.reason.as_deref().unwrap_or("")))
        .collect();
    assert!(failures.is_empty(), "failed scenarios: {failures:#?}");
    assert_eq!(summary.total, scenarios::all().len());

    let lines = log.buffered_lines();
    assert_eq!(lines.len(), summary.total + 2);
    for (i, line) in lines.iter().enumerate() {
        if let Err(errors) = validate_log_line(line, i + 1) {
            panic!("line {} invalid: {errors:?}", i + 1);
        }
    }

    let summary_json = serde_json::to_value(&summary).unwrap();
    assert_eq!(summary_json["failed"], 0);
    assert!(summary_json["results"][0].get("reason").is_none());

    std::fs::remove_dir_all(&scratch).unwrap();
}
