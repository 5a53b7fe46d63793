//! Configuration for schema evaluation.

use crate::errors::SuitError;
use serde::{Deserialize, Serialize};

/// How to handle field failures during a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    /// Evaluate every field and report every discrepancy (default).
    #[default]
    CollectAll,
    /// Stop at the first field that fails.
    FailFast,
}

/// Options for a `fit` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Aggregation policy.
    #[serde(default)]
    pub failure_mode: FailureMode,
    /// Whether each discrepancy is logged at debug level as it is recorded.
    #[serde(default = "default_log_discrepancies")]
    pub log_discrepancies: bool,
}

fn default_log_discrepancies() -> bool {
    true
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            failure_mode: FailureMode::default(),
            log_discrepancies: default_log_discrepancies(),
        }
    }
}

impl FitConfig {
    /// Creates a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON text. Missing keys take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, SuitError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Sets the failure mode.
    #[must_use]
    pub fn with_failure_mode(mut self, mode: FailureMode) -> Self {
        self.failure_mode = mode;
        self
    }

    /// Shorthand for `FailureMode::FailFast`.
    #[must_use]
    pub fn fail_fast(self) -> Self {
        self.with_failure_mode(FailureMode::FailFast)
    }

    /// Enables or disables per-discrepancy logging.
    #[must_use]
    pub fn with_log_discrepancies(mut self, enabled: bool) -> Self {
        self.log_discrepancies = enabled;
        self
    }

    /// Returns true if evaluation should stop given `recorded` discrepancies so far.
    #[must_use]
    pub fn should_stop(&self, recorded: usize) -> bool {
        match self.failure_mode {
            FailureMode::FailFast => recorded > 0,
            FailureMode::CollectAll => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FitConfig::new();
        assert_eq!(config.failure_mode, FailureMode::CollectAll);
        assert!(config.log_discrepancies);
        assert!(!config.should_stop(3));
    }

    #[test]
    fn test_fail_fast_stops_after_first() {
        let config = FitConfig::new().fail_fast();
        assert!(!config.should_stop(0));
        assert!(config.should_stop(1));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: FitConfig = serde_json::from_str(r#"{"failure_mode": "fail_fast"}"#).unwrap();
        assert_eq!(config.failure_mode, FailureMode::FailFast);
        assert!(config.log_discrepancies);

        let config: FitConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, FitConfig::default());
    }

    #[test]
    fn test_from_json_str() {
        let config = FitConfig::from_json_str(r#"{"log_discrepancies": false}"#).unwrap();
        assert_eq!(config.failure_mode, FailureMode::CollectAll);
        assert!(!config.log_discrepancies);

        let err = FitConfig::from_json_str(r#"{"failure_mode": "sometimes"}"#).unwrap_err();
        assert!(matches!(err, SuitError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
