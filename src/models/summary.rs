use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Half-open interval `[start, end)` used to group workouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
  pub label: String,
  /// Nominal width in weeks, the divisor for weekly averages
  pub weeks: u32,
}

impl TimeWindow {
  pub fn contains(&self, instant: DateTime<Utc>) -> bool {
    instant >= self.start && instant < self.end
  }

  pub fn width_days(&self) -> i64 {
    (self.end - self.start).num_days()
  }
}

/// Aggregate statistics for one populated historical window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSummary {
  pub window: TimeWindow,
  pub total_miles: f64,
  pub run_count: usize,
  pub avg_weekly_miles: f64,
  pub avg_runs_per_week: f64,

  /// Mean effort over workouts that reported one
  #[serde(skip_serializing_if = "Option::is_none")]
  pub avg_effort: Option<f64>,

  pub longest_run: f64,

  /// Logged minutes; not part of the rendered line
  pub total_minutes: f64,

  pub workout_counts: BTreeMap<String, usize>,
}

impl BucketSummary {
  pub fn label(&self) -> &str {
    &self.window.label
  }

  /// Most frequent workout types, count descending then label ascending
  pub fn top_types(&self, limit: usize) -> Vec<(&str, usize)> {
    let mut types: Vec<(&str, usize)> = self
      .workout_counts
      .iter()
      .map(|(name, count)| (name.as_str(), *count))
      .collect();

    // BTreeMap iteration is already label-ordered, so a stable sort keeps ties alphabetical
    types.sort_by(|a, b| b.1.cmp(&a.1));
    types.truncate(limit);
    types
  }
}
