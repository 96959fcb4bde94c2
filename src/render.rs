//! Text rendering of the recent window and historical buckets
//!
//! Output is plain text with hyphen bullets, meant to be pasted verbatim into
//! a larger prompt. Identical input always renders identical bytes.

use crate::config::HistoryConfig;
use crate::models::{BucketSummary, WorkoutRecord};

pub const RECENT_HEADER: &str = "Last 4 weeks:";
pub const HISTORY_HEADER: &str = "Older history:";

pub const NO_RECENT_RUNS: &str = "No runs logged in the last 4 weeks.";
pub const NO_OLDER_HISTORY: &str = "Not enough older data to summarize yet.";

const BULLET: &str = "  - ";

/// Fixed-point formatting with trailing zeros and a bare trailing point removed.
///
/// `4.0` renders as `4`, `4.50` as `4.5`, `4.25` as `4.25`.
pub fn format_number(value: f64, precision: usize) -> String {
  let fixed = format!("{:.*}", precision, value);
  let trimmed = if fixed.contains('.') {
    fixed.trim_end_matches('0').trim_end_matches('.')
  } else {
    fixed.as_str()
  };

  match trimmed {
    "-0" => "0".to_string(),
    other => other.to_string(),
  }
}

/// One line per recent workout, newest first, plus an overflow line if capped
pub fn recent_lines(records: &[WorkoutRecord], config: &HistoryConfig) -> Vec<String> {
  if records.is_empty() {
    return vec![NO_RECENT_RUNS.to_string()];
  }

  let mut lines: Vec<String> = records
    .iter()
    .take(config.max_recent_runs)
    .map(recent_line)
    .collect();

  let overflow = records.len().saturating_sub(config.max_recent_runs);
  if overflow > 0 {
    lines.push(format!("...and {} more runs within the last 4 weeks.", overflow));
  }

  lines
}

fn recent_line(record: &WorkoutRecord) -> String {
  let distance = record
    .distance
    .map(|d| format_number(d, 2))
    .unwrap_or_else(|| "distance N/A".to_string());
  let effort = record
    .effort
    .map(|e| format_number(e, 1))
    .unwrap_or_else(|| "N/A".to_string());

  format!(
    "{}: {}, {} mi, effort {}/10",
    record.date.format("%Y-%m-%d"),
    record.workout_type,
    distance,
    effort
  )
}

/// One line per populated bucket, newest first
pub fn history_lines(summaries: &[BucketSummary], config: &HistoryConfig) -> Vec<String> {
  if summaries.is_empty() {
    return vec![NO_OLDER_HISTORY.to_string()];
  }

  summaries
    .iter()
    .map(|summary| history_line(summary, config.max_listed_types))
    .collect()
}

fn history_line(summary: &BucketSummary, max_types: usize) -> String {
  let mut line = format!(
    "{}: {} mi across {} runs, avg {} mi/wk, {} runs/wk",
    summary.label(),
    format_number(summary.total_miles, 2),
    summary.run_count,
    format_number(summary.avg_weekly_miles, 2),
    format_number(summary.avg_runs_per_week, 2),
  );

  if summary.longest_run > 0.0 {
    line.push_str(&format!(", longest {} mi", format_number(summary.longest_run, 2)));
  }

  if let Some(effort) = summary.avg_effort {
    line.push_str(&format!(", avg effort {}/10", format_number(effort, 1)));
  }

  line.push('.');

  let types: Vec<String> = summary
    .top_types(max_types)
    .into_iter()
    .map(|(name, count)| format!("{} x{}", name, count))
    .collect();
  if !types.is_empty() {
    line.push_str(" Types: ");
    line.push_str(&types.join(", "));
  }

  line
}

/// Assemble the full text block
pub fn render_block(
  recent: &[WorkoutRecord],
  history: &[BucketSummary],
  config: &HistoryConfig,
) -> String {
  let mut out = String::new();

  out.push_str(RECENT_HEADER);
  out.push('\n');
  for line in recent_lines(recent, config) {
    out.push_str(BULLET);
    out.push_str(&line);
    out.push('\n');
  }

  out.push_str(HISTORY_HEADER);
  out.push('\n');
  for line in history_lines(history, config) {
    out.push_str(BULLET);
    out.push_str(&line);
    out.push('\n');
  }

  out
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
