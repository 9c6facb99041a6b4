//! Scenario execution engine.

use std::path::PathBuf;
use std::time::Instant;

use serde::Serialize;

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::scenarios::{self, Scenario};
use crate::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome};

/// Result of a single scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub symbol: String,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub latency_ns: u64,
}

/// Aggregate over one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<ScenarioResult>,
}

impl RunSummary {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// `Ok(self)` when every scenario passed, `HarnessError::Failed` otherwise.
    pub fn into_result(self) -> Result<Self, HarnessError> {
        if self.all_passed() {
            Ok(self)
        } else {
            Err(HarnessError::Failed {
                failed: self.failed,
                total: self.total,
            })
        }
    }
}

/// Runs the selected scenarios, one scratch directory each.
pub struct ScenarioRunner {
    config: HarnessConfig,
}

impl ScenarioRunner {
    #[must_use]
    pub fn new(config: HarnessConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Scenarios this runner would execute.
    #[must_use]
    pub fn selected(&self) -> Vec<Scenario> {
        scenarios::select(self.config.filter.as_deref())
    }

    /// Execute every selected scenario, logging a record per outcome.
    pub fn run(&self, log: &mut LogEmitter) -> Result<RunSummary, HarnessError> {
        let selected = self.selected();
        log.emit_entry(
            LogEntry::new("", LogLevel::Info, "run_start").with_details(serde_json::json!({
                "scenarios": selected.len(),
                "scratch_dir": self.config.scratch_dir.display().to_string(),
            })),
        )?;

        let mut results = Vec::with_capacity(selected.len());
        for scenario in &selected {
            let result = self.run_one(scenario)?;

            let mut entry = LogEntry::new(
                "",
                if result.passed {
                    LogLevel::Info
                } else {
                    LogLevel::Error
                },
                "scenario_result",
            )
            .with_scenario(scenario.name, scenario.symbol)
            .with_outcome(if result.passed {
                Outcome::Pass
            } else {
                Outcome::Fail
            })
            .with_latency_ns(result.latency_ns);
            if let Some(mode) = scenario.mode {
                entry = entry.with_mode(mode);
            }
            if let Some(reason) = &result.reason {
                entry = entry.with_details(serde_json::json!({ "reason": reason }));
            }
            log.emit_entry(entry)?;

            results.push(result);
        }

        // Only succeeds once every scenario directory is gone.
        let _ = std::fs::remove_dir(self.run_root());

        let passed = results.iter().filter(|r| r.passed).count();
        let summary = RunSummary {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        };

        log.emit_entry(
            LogEntry::new(
                "",
                if summary.all_passed() {
                    LogLevel::Info
                } else {
                    LogLevel::Warn
                },
                "run_end",
            )
            .with_details(serde_json::json!({
                "total": summary.total,
                "passed": summary.passed,
                "failed": summary.failed,
            })),
        )?;
        log.flush()?;
        Ok(summary)
    }

    fn run_one(&self, scenario: &Scenario) -> Result<ScenarioResult, HarnessError> {
        let dir = self.scratch_for(scenario.name);
        if dir.exists() {
            std::fs::remove_dir_all(&dir)?;
        }
        std::fs::create_dir_all(&dir)?;

        let start = Instant::now();
        let outcome = (scenario.run)(&dir);
        let latency_ns = u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX);

        std::fs::remove_dir_all(&dir)?;

        Ok(ScenarioResult {
            name: scenario.name.to_string(),
            symbol: scenario.symbol.to_string(),
            passed: outcome.is_ok(),
            reason: outcome.err(),
            latency_ns,
        })
    }

    fn run_root(&self) -> PathBuf {
        self.config
            .scratch_dir
            .join(format!("cfile-harness-{}", std::process::id()))
    }

    fn scratch_for(&self, name: &str) -> PathBuf {
        self.run_root().join(name)
    }
}
