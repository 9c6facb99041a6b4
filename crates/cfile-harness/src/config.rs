//! Harness configuration.
//!
//! The scratch directory for on-disk scenarios is resolved in order:
//! 1. an explicit `--scratch-dir` on the command line,
//! 2. the `CFILE_HARNESS_SCRATCH` environment variable,
//! 3. the platform temporary directory.

use std::path::PathBuf;

/// Environment variable overriding the default scratch directory.
pub const SCRATCH_ENV: &str = "CFILE_HARNESS_SCRATCH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    pub scratch_dir: PathBuf,
    /// Only run scenarios whose name contains this substring.
    pub filter: Option<String>,
}

impl HarnessConfig {
    /// Resolve configuration from CLI overrides and the environment.
    #[must_use]
    pub fn resolve(scratch_dir: Option<PathBuf>, filter: Option<String>) -> Self {
        let env = std::env::var_os(SCRATCH_ENV).map(PathBuf::from);
        Self::from_parts(scratch_dir, env, filter)
    }

    fn from_parts(cli: Option<PathBuf>, env: Option<PathBuf>, filter: Option<String>) -> Self {
        let scratch_dir = cli
            .or(env.filter(|p| !p.as_os_str().is_empty()))
            .unwrap_or_else(std::env::temp_dir);
        Self {
            scratch_dir,
            filter: filter.filter(|f| !f.is_empty()),
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_beats_env() {
        let cfg = HarnessConfig::from_parts(
            Some(PathBuf::from("/cli")),
            Some(PathBuf::from("/env")),
            None,
        );
        assert_eq!(cfg.scratch_dir, PathBuf::from("/cli"));
    }

    #[test]
    fn env_beats_temp_dir() {
        let cfg = HarnessConfig::from_parts(None, Some(PathBuf::from("/env")), None);
        assert_eq!(cfg.scratch_dir, PathBuf::from("/env"));
    }

    #[test]
    fn empty_values_fall_through() {
        let cfg = HarnessConfig::from_parts(None, Some(PathBuf::new()), Some(String::new()));
        assert_eq!(cfg.scratch_dir, std::env::temp_dir());
        assert_eq!(cfg.filter, None);
    }
}
