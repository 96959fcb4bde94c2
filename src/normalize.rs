//! Normalization of raw workout logs
//!
//! Turns loosely-typed records into canonical [`WorkoutRecord`]s. A record is
//! only ever dropped when its date cannot be read; numeric fields that fail to
//! parse become `None` so the workout still counts toward run totals.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use tracing::debug;

use crate::models::{RawWorkout, WorkoutRecord};

const DEFAULT_WORKOUT_TYPE: &str = "Run";

/// Naive timestamp layouts accepted in addition to RFC 3339, read as UTC
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// ---------------------------------------------------------------------------
/// Field Parsing
/// ---------------------------------------------------------------------------

/// Parse a date-like value into its UTC calendar day.
///
/// Strings may be RFC 3339, a naive timestamp, or a bare `YYYY-MM-DD`;
/// numbers are epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<NaiveDate> {
  match value {
    Value::String(s) => parse_date_str(s.trim()),
    Value::Number(n) => {
      let millis = n.as_f64().filter(|m| m.is_finite())?;
      DateTime::<Utc>::from_timestamp_millis(millis as i64).map(|dt| dt.date_naive())
    }
    _ => None,
  }
}

fn parse_date_str(s: &str) -> Option<NaiveDate> {
  if s.is_empty() {
    return None;
  }

  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc).date_naive());
  }

  for format in NAIVE_DATETIME_FORMATS {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
      return Some(dt.date());
    }
  }

  NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse a numeric-like value (JSON number or numeric string)
pub fn parse_number(value: &Value) -> Option<f64> {
  let parsed = match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  parsed.filter(|n| n.is_finite())
}

fn parse_non_negative(value: Option<&Value>) -> Option<f64> {
  value.and_then(parse_number).filter(|n| *n >= 0.0)
}

/// Workout label, falling back to "Run" when absent or blank
pub fn normalize_type(value: Option<&Value>) -> String {
  match value {
    Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
    _ => DEFAULT_WORKOUT_TYPE.to_string(),
  }
}

/// ---------------------------------------------------------------------------
/// Record Normalization
/// ---------------------------------------------------------------------------

/// Convert one raw record; `None` when the date is unusable
pub fn normalize_workout(raw: &RawWorkout) -> Option<WorkoutRecord> {
  let Some(date) = raw.date.as_ref().and_then(parse_date) else {
    debug!(id = ?raw.id, date = ?raw.date, "Dropping workout with unparseable date");
    return None;
  };

  Some(WorkoutRecord {
    date,
    workout_type: normalize_type(raw.workout_type.as_ref()),
    distance: parse_non_negative(raw.distance.as_ref()),
    duration: parse_non_negative(raw.duration.as_ref()),
    effort: raw.effort.as_ref().and_then(parse_number),
  })
}

/// Normalize a whole log, newest first.
///
/// Workouts sharing a day keep their input order.
pub fn normalize_workouts(raw: &[RawWorkout]) -> Vec<WorkoutRecord> {
  let mut records: Vec<WorkoutRecord> = raw.iter().filter_map(normalize_workout).collect();
  records.sort_by(|a, b| b.date.cmp(&a.date));
  records
}

/// Read an arbitrary JSON element as a raw workout; non-objects are not workouts
pub fn raw_from_value(value: &Value) -> Option<RawWorkout> {
  if !value.is_object() {
    debug!(kind = value_kind(value), "Dropping non-object workout entry");
    return None;
  }
  serde_json::from_value(value.clone()).ok()
}

fn value_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "bool",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
