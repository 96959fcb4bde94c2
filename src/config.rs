//! Rendering configuration
//!
//! Defaults match the prompt layout; environment variables can override them.

use serde::{Deserialize, Serialize};
use std::env;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

pub const MAX_RECENT_RUNS_VAR: &str = "HISTORY_MAX_RECENT_RUNS";
pub const MAX_LISTED_TYPES_VAR: &str = "HISTORY_MAX_LISTED_TYPES";

/// Rendering knobs for the history summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
  /// Individual runs listed for the recent window before the overflow line
  pub max_recent_runs: usize,

  /// Workout types listed per historical bucket
  pub max_listed_types: usize,
}

impl Default for HistoryConfig {
  fn default() -> Self {
    Self {
      max_recent_runs: 8,
      max_listed_types: 3,
    }
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {key}: {value:?}")]
  InvalidValue { key: String, value: String },
}

impl Serialize for ConfigError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

impl HistoryConfig {
  /// Load overrides from the environment; unset variables keep their defaults
  pub fn from_env() -> Result<Self, ConfigError> {
    let defaults = Self::default();
    Ok(Self {
      max_recent_runs: read_usize(MAX_RECENT_RUNS_VAR)?.unwrap_or(defaults.max_recent_runs),
      max_listed_types: read_usize(MAX_LISTED_TYPES_VAR)?.unwrap_or(defaults.max_listed_types),
    })
  }
}

fn read_usize(key: &str) -> Result<Option<usize>, ConfigError> {
  match env::var(key) {
    Ok(value) => value
      .trim()
      .parse::<usize>()
      .map(Some)
      .map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value,
      }),
    Err(_) => Ok(None),
  }
}
