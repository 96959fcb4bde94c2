//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - A fixed reference instant so rendered dates are stable
//! - Mock data factories for raw and canonical workouts
//! - Helper assertions

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::models::{RawWorkout, TimeWindow, WorkoutRecord};

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Saturday 2024-06-01 12:00 UTC
pub fn fixed_reference() -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// The instant `days` days before `reference`
pub fn days_before(reference: DateTime<Utc>, days: i64) -> DateTime<Utc> {
  reference - Duration::days(days)
}

/// A labeled window `[reference - start_days, reference - start_days + width_days)`
pub fn window_days_ago(
  reference: DateTime<Utc>,
  start_days: i64,
  width_days: i64,
  weeks: u32,
) -> TimeWindow {
  let start = days_before(reference, start_days);
  TimeWindow {
    start,
    end: start + Duration::days(width_days),
    label: "[test window]".to_string(),
    weeks,
  }
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Canonical workout logged `days_ago` days before `reference`
pub fn mock_workout(
  reference: DateTime<Utc>,
  days_ago: i64,
  workout_type: &str,
  distance: Option<f64>,
  effort: Option<f64>,
) -> WorkoutRecord {
  WorkoutRecord {
    date: days_before(reference, days_ago).date_naive(),
    workout_type: workout_type.to_string(),
    distance,
    duration: None,
    effort,
  }
}

/// Deserialize a raw workout from a JSON literal
pub fn raw_workout(value: Value) -> RawWorkout {
  serde_json::from_value(value).expect("raw workouts accept any object")
}

/// Raw workout dated `days_ago` days before `reference`, other fields from `fields`
pub fn raw_days_ago(reference: DateTime<Utc>, days_ago: i64, fields: Value) -> RawWorkout {
  let mut raw = raw_workout(fields);
  raw.date = Some(Value::String(
    days_before(reference, days_ago).format("%Y-%m-%d").to_string(),
  ));
  raw
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use serde_json::json;

  #[test]
  fn test_mock_factories_create_valid_data() {
    let reference = fixed_reference();

    let workout = mock_workout(reference, 1, "Run", Some(5.0), Some(6.0));
    assert_eq!(workout.date, NaiveDate::from_ymd_opt(2024, 5, 31).unwrap());
    assert_eq!(workout.distance, Some(5.0));

    let raw = raw_days_ago(reference, 7, json!({"distance": 3}));
    assert_eq!(raw.date, Some(json!("2024-05-25")));
    assert_eq!(raw.distance, Some(json!(3)));
  }

  #[test]
  fn test_window_helper() {
    let reference = fixed_reference();
    let window = window_days_ago(reference, 56, 28, 4);
    assert_eq!(window.width_days(), 28);
    assert_eq!(window.end, days_before(reference, 28));
  }
}
