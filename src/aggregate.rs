//! Per-bucket statistics
//!
//! A pure numeric fold over the workouts inside one window. Mileage counts
//! every workout (unknown distance as zero) while effort is averaged only over
//! workouts that reported it.

use std::collections::BTreeMap;
use tracing::trace;

use crate::models::{BucketSummary, TimeWindow, WorkoutRecord};

/// Round half away from zero to `decimals` places.
///
/// Values too large to scale are already integral and come back unchanged.
pub fn round_to(value: f64, decimals: i32) -> f64 {
  let factor = 10f64.powi(decimals);
  let scaled = value * factor;
  if !scaled.is_finite() {
    return value;
  }
  scaled.round() / factor
}

impl BucketSummary {
  /// Aggregate the workouts already known to fall inside `window`
  pub fn compute<'a, I>(window: TimeWindow, records: I) -> Self
  where
    I: IntoIterator<Item = &'a WorkoutRecord>,
  {
    let mut total_miles = 0.0;
    let mut total_minutes = 0.0;
    let mut longest_run: f64 = 0.0;
    let mut run_count = 0usize;
    let mut effort_sum = 0.0;
    let mut effort_count = 0usize;
    let mut workout_counts: BTreeMap<String, usize> = BTreeMap::new();

    for record in records {
      let miles = record.miles();
      total_miles += miles;
      longest_run = longest_run.max(miles);
      total_minutes += record.duration.unwrap_or(0.0);
      run_count += 1;

      if let Some(effort) = record.effort {
        effort_sum += effort;
        effort_count += 1;
      }

      *workout_counts.entry(record.workout_type.clone()).or_insert(0) += 1;
    }

    let weeks = window.weeks as f64;
    let (avg_weekly_miles, avg_runs_per_week) = if weeks > 0.0 {
      (total_miles / weeks, run_count as f64 / weeks)
    } else {
      (0.0, 0.0)
    };

    let avg_effort = if effort_count > 0 {
      Some(round_to(effort_sum / effort_count as f64, 1))
    } else {
      None
    };

    Self {
      window,
      total_miles: round_to(total_miles, 2),
      run_count,
      avg_weekly_miles: round_to(avg_weekly_miles, 2),
      avg_runs_per_week: round_to(avg_runs_per_week, 2),
      avg_effort,
      longest_run: round_to(longest_run, 2),
      total_minutes: round_to(total_minutes, 2),
      workout_counts,
    }
  }
}

/// Summarize each window over the workouts it contains.
///
/// Windows with no workouts are skipped rather than reported as empty.
pub fn summarize_windows<I>(windows: I, records: &[WorkoutRecord]) -> Vec<BucketSummary>
where
  I: IntoIterator<Item = TimeWindow>,
{
  windows
    .into_iter()
    .filter_map(|window| {
      let matching: Vec<&WorkoutRecord> = records
        .iter()
        .filter(|r| window.contains(r.instant()))
        .collect();

      if matching.is_empty() {
        trace!(label = %window.label, "Skipping empty bucket");
        return None;
      }

      Some(BucketSummary::compute(window, matching))
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::buckets::BucketPlan;
  use crate::test_utils::{fixed_reference, mock_workout, window_days_ago};

  #[test]
  fn test_round_to() {
    assert_eq!(round_to(2.345, 1), 2.3);
    assert_eq!(round_to(2.5, 0), 3.0);
    assert_eq!(round_to(10.0 / 3.0, 2), 3.33);
    assert_eq!(round_to(-1.25, 1), -1.3);
  }

  #[test]
  fn test_round_to_keeps_huge_values_finite() {
    assert_eq!(round_to(1e307, 2), 1e307);
    assert_eq!(round_to(-1e307, 2), -1e307);
    assert_eq!(round_to(f64::MAX, 1), f64::MAX);
  }

  #[test]
  fn test_huge_distance_stays_finite() {
    let reference = fixed_reference();
    let window = window_days_ago(reference, 56, 28, 4);
    let record = mock_workout(reference, 40, "Run", Some(1e307), None);

    let summary = BucketSummary::compute(window, [&record]);

    assert!(summary.total_miles.is_finite());
    assert!(summary.avg_weekly_miles.is_finite());
    assert!(summary.longest_run.is_finite());
    assert_eq!(summary.longest_run, 1e307);
  }

  #[test]
  fn test_single_run_bucket() {
    let reference = fixed_reference();
    let window = window_days_ago(reference, 56, 28, 4);
    let record = mock_workout(reference, 40, "Run", Some(10.0), None);

    let summary = BucketSummary::compute(window, [&record]);

    assert_eq!(summary.total_miles, 10.0);
    assert_eq!(summary.run_count, 1);
    assert_eq!(summary.avg_weekly_miles, 2.5);
    assert_eq!(summary.avg_runs_per_week, 0.25);
    assert_eq!(summary.longest_run, 10.0);
    assert_eq!(summary.avg_effort, None);
    assert_eq!(summary.workout_counts.get("Run"), Some(&1));
  }

  #[test]
  fn test_unknown_distance_counts_as_run_but_not_miles() {
    let reference = fixed_reference();
    let window = window_days_ago(reference, 56, 28, 4);
    let records = vec![
      mock_workout(reference, 30, "Run", Some(6.0), Some(5.0)),
      mock_workout(reference, 31, "Run", None, None),
    ];

    let summary = BucketSummary::compute(window, &records);

    assert_eq!(summary.run_count, 2);
    assert_eq!(summary.total_miles, 6.0);
    assert_eq!(summary.avg_runs_per_week, 0.5);
    // Effort averages only over workouts that reported it
    assert_eq!(summary.avg_effort, Some(5.0));
  }

  #[test]
  fn test_effort_average_rounds_to_one_decimal() {
    let reference = fixed_reference();
    let window = window_days_ago(reference, 56, 28, 4);
    let records = vec![
      mock_workout(reference, 30, "Run", Some(3.0), Some(6.0)),
      mock_workout(reference, 32, "Run", Some(3.0), Some(7.0)),
      mock_workout(reference, 34, "Run", Some(3.0), Some(7.0)),
    ];

    let summary = BucketSummary::compute(window, &records);
    assert_eq!(summary.avg_effort, Some(6.7));
  }

  #[test]
  fn test_mileage_rounding_and_longest() {
    let reference = fixed_reference();
    let window = window_days_ago(reference, 56, 28, 4);
    let records = vec![
      mock_workout(reference, 30, "Easy", Some(3.333), None),
      mock_workout(reference, 33, "Long Run", Some(12.456), None),
      mock_workout(reference, 35, "Easy", Some(4.1), None),
    ];

    let summary = BucketSummary::compute(window, &records);

    assert_approx_eq!(summary.total_miles, 19.89, 1e-9);
    assert_approx_eq!(summary.avg_weekly_miles, 4.97, 1e-9);
    assert_approx_eq!(summary.longest_run, 12.46, 1e-9);
    assert_eq!(summary.workout_counts.get("Easy"), Some(&2));
    assert_eq!(summary.workout_counts.get("Long Run"), Some(&1));
  }

  #[test]
  fn test_zero_week_window_yields_zero_averages() {
    let reference = fixed_reference();
    let window = window_days_ago(reference, 56, 28, 0);
    let record = mock_workout(reference, 40, "Run", Some(5.0), None);

    let summary = BucketSummary::compute(window, [&record]);
    assert_eq!(summary.avg_weekly_miles, 0.0);
    assert_eq!(summary.avg_runs_per_week, 0.0);
    assert_eq!(summary.total_miles, 5.0);
  }

  #[test]
  fn test_top_types_orders_by_count_then_label() {
    let reference = fixed_reference();
    let window = window_days_ago(reference, 56, 28, 4);
    let records = vec![
      mock_workout(reference, 30, "Tempo", Some(5.0), None),
      mock_workout(reference, 31, "Easy", Some(5.0), None),
      mock_workout(reference, 32, "Easy", Some(5.0), None),
      mock_workout(reference, 33, "Intervals", Some(5.0), None),
      mock_workout(reference, 34, "Hills", Some(5.0), None),
    ];

    let summary = BucketSummary::compute(window, &records);
    let top = summary.top_types(3);
    assert_eq!(top, vec![("Easy", 2), ("Hills", 1), ("Intervals", 1)]);
  }

  #[test]
  fn test_summarize_windows_skips_empty_buckets() {
    // Arrange: one run ~6 weeks back and one ~30 weeks back, nothing between
    let reference = fixed_reference();
    let records = vec![
      mock_workout(reference, 40, "Run", Some(5.0), None),
      mock_workout(reference, 210, "Run", Some(8.0), None),
    ];

    // Act
    let summaries = summarize_windows(BucketPlan::for_records(reference, &records), &records);

    // Assert
    let labels: Vec<&str> = summaries.iter().map(|s| s.label()).collect();
    assert_eq!(labels, vec!["[5-8 weeks ago]", "[29-32 weeks ago]"]);
    assert!(summaries.iter().all(|s| s.run_count == 1));
  }
}
