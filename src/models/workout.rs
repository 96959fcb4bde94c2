use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A workout as handed over by the persistence layer, before any validation.
///
/// Every field is kept as a raw JSON value so that a malformed field never
/// prevents the rest of the record (or the rest of the log) from loading.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWorkout {
  #[serde(default)]
  pub id: Option<Value>,
  #[serde(default)]
  pub date: Option<Value>,
  #[serde(default, rename = "type")]
  pub workout_type: Option<Value>,
  #[serde(default)]
  pub activity_type: Option<Value>,
  #[serde(default)]
  pub distance: Option<Value>,
  #[serde(default)]
  pub duration: Option<Value>,
  #[serde(default)]
  pub effort: Option<Value>,
  #[serde(default)]
  pub notes: Option<Value>,
}

/// Canonical workout after normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
  /// Calendar day (UTC) the workout was logged on
  pub date: NaiveDate,
  pub workout_type: String,
  /// Miles; `None` when the source value was missing or unparseable
  pub distance: Option<f64>,
  /// Minutes; `None` when missing or unparseable
  pub duration: Option<f64>,
  /// Self-reported effort, observed on a 0-10 scale
  pub effort: Option<f64>,
}

impl WorkoutRecord {
  /// Midnight UTC of the workout day, the instant used for bucketing
  pub fn instant(&self) -> DateTime<Utc> {
    self.date.and_time(chrono::NaiveTime::MIN).and_utc()
  }

  /// Distance counted toward mileage totals (unknown counts as zero)
  pub fn miles(&self) -> f64 {
    self.distance.unwrap_or(0.0)
  }
}
