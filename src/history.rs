//! History context assembly
//!
//! Ties the pipeline together: normalize the raw log, split off the recent
//! window, plan and aggregate the older buckets, and render the text block.
//! Every entry point except [`summarize_json`] is total over its input.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::aggregate::summarize_windows;
use crate::buckets::{recent_window, BucketPlan};
use crate::config::HistoryConfig;
use crate::models::{BucketSummary, RawWorkout, TimeWindow, WorkoutRecord};
use crate::normalize::{normalize_workouts, raw_from_value};
use crate::render::render_block;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum HistoryError {
  #[error("Invalid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("Expected an array of workouts or an object with a \"workouts\" array")]
  NotArray,
}

impl Serialize for HistoryError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// History Context
/// ---------------------------------------------------------------------------

/// Structured result of summarizing a workout log at a reference instant
#[derive(Debug, Clone, Serialize)]
pub struct HistoryContext {
  pub reference: DateTime<Utc>,

  pub recent_window: TimeWindow,

  /// Workouts inside the recent window, newest first
  pub recent: Vec<WorkoutRecord>,

  /// Populated historical buckets, newest first
  pub history: Vec<BucketSummary>,

  /// Records discarded during normalization
  pub dropped: usize,

  #[serde(skip)]
  config: HistoryConfig,
}

impl HistoryContext {
  pub fn config(&self) -> &HistoryConfig {
    &self.config
  }

  /// The plain-text block for prompt inclusion
  pub fn render(&self) -> String {
    render_block(&self.recent, &self.history, &self.config)
  }

  pub fn to_json(&self) -> String {
    serde_json::to_string_pretty(self).unwrap_or_default()
  }
}

/// Summarize `raw` as of `reference`
#[instrument(skip_all, fields(workouts = raw.len(), reference = %reference))]
pub fn build_history_context(
  raw: &[RawWorkout],
  reference: DateTime<Utc>,
  config: &HistoryConfig,
) -> HistoryContext {
  let records = normalize_workouts(raw);
  let dropped = raw.len() - records.len();

  let recent_window = recent_window(reference);
  let recent: Vec<WorkoutRecord> = records
    .iter()
    .filter(|r| recent_window.contains(r.instant()))
    .cloned()
    .collect();

  let future = records.iter().filter(|r| r.instant() >= reference).count();
  if future > 0 {
    debug!(future, "Ignoring workouts dated at or after the reference");
  }

  let history = summarize_windows(BucketPlan::for_records(reference, &records), &records);

  debug!(
    valid = records.len(),
    dropped,
    recent = recent.len(),
    buckets = history.len(),
    "Built history context"
  );

  HistoryContext {
    reference,
    recent_window,
    recent,
    history,
    dropped,
    config: config.clone(),
  }
}

/// Render the summary for `raw` with default settings
pub fn summarize_workouts(raw: &[RawWorkout], reference: DateTime<Utc>) -> String {
  build_history_context(raw, reference, &HistoryConfig::default()).render()
}

/// Render the summary as of now
pub fn summarize_workouts_now(raw: &[RawWorkout]) -> String {
  summarize_workouts(raw, Utc::now())
}

/// Build a context from arbitrary JSON elements; non-object elements count as dropped
pub fn build_history_context_from_values(
  values: &[Value],
  reference: DateTime<Utc>,
  config: &HistoryConfig,
) -> HistoryContext {
  let raw: Vec<RawWorkout> = values.iter().filter_map(raw_from_value).collect();
  let mut context = build_history_context(&raw, reference, config);
  context.dropped += values.len() - raw.len();
  context
}

/// Render the summary for a JSON payload from the persistence layer.
///
/// Accepts a bare array of workouts or an object carrying a `workouts` array.
pub fn summarize_json(json: &str, reference: DateTime<Utc>) -> Result<String, HistoryError> {
  let payload: Value = serde_json::from_str(json)?;
  let values = match &payload {
    Value::Array(items) => items,
    Value::Object(map) => match map.get("workouts") {
      Some(Value::Array(items)) => items,
      _ => return Err(HistoryError::NotArray),
    },
    _ => return Err(HistoryError::NotArray),
  };

  Ok(build_history_context_from_values(values, reference, &HistoryConfig::default()).render())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
