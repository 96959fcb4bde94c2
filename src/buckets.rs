//! Bucket planning
//!
//! Splits history into a fixed recent window followed by progressively
//! coarser windows walking back in time: 4-week buckets until one year before
//! the reference, then 52-week buckets until the oldest workout is covered.

use chrono::{DateTime, Duration, Months, Utc};
use std::iter::FusedIterator;
use tracing::{debug, trace};

use crate::models::{TimeWindow, WorkoutRecord};

/// ---------------------------------------------------------------------------
/// Window Constants
/// ---------------------------------------------------------------------------

pub const RECENT_WINDOW_DAYS: i64 = 28;
pub const FOUR_WEEK_BUCKET_DAYS: i64 = 28;
pub const YEAR_BUCKET_DAYS: i64 = 364;

const FOUR_WEEK_BUCKET_WEEKS: u32 = 4;
const YEAR_BUCKET_WEEKS: u32 = 52;

pub const RECENT_WINDOW_LABEL: &str = "Last 4 weeks";

/// `days` before `instant`, saturating at the earliest representable instant
fn days_back(instant: DateTime<Utc>, days: i64) -> DateTime<Utc> {
  instant
    .checked_sub_signed(Duration::days(days))
    .unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// The always-present window `[reference - 28 days, reference)`
pub fn recent_window(reference: DateTime<Utc>) -> TimeWindow {
  TimeWindow {
    start: days_back(reference, RECENT_WINDOW_DAYS),
    end: reference,
    label: RECENT_WINDOW_LABEL.to_string(),
    weeks: FOUR_WEEK_BUCKET_WEEKS,
  }
}

/// ---------------------------------------------------------------------------
/// Bucket Plan
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  /// 4-week buckets; `index` 1 is the bucket right before the recent window
  FourWeek { index: u32, end: DateTime<Utc> },
  /// 52-week buckets; `index` 1 is "1-2 years ago"
  Year { index: u32, end: DateTime<Utc> },
  Done,
}

/// Lazy, finite sequence of historical windows, newest first.
///
/// Windows are contiguous: each one ends where the previous one started, and
/// the first one ends where the recent window starts.
#[derive(Debug, Clone)]
pub struct BucketPlan {
  phase: Phase,
  oldest: DateTime<Utc>,
  year_cutoff: DateTime<Utc>,
}

impl BucketPlan {
  /// Plan windows back from `reference` until `oldest` is covered.
  ///
  /// With no oldest workout there is nothing to cover and the plan is empty.
  pub fn new(reference: DateTime<Utc>, oldest: Option<DateTime<Utc>>) -> Self {
    let year_cutoff = reference
      .checked_sub_months(Months::new(12))
      .unwrap_or_else(|| days_back(reference, 365));

    let phase = match oldest {
      Some(_) => Phase::FourWeek {
        index: 1,
        end: days_back(reference, RECENT_WINDOW_DAYS),
      },
      None => Phase::Done,
    };

    Self {
      phase,
      oldest: oldest.unwrap_or(reference),
      year_cutoff,
    }
  }

  /// Plan windows covering every record in `records`
  pub fn for_records(reference: DateTime<Utc>, records: &[WorkoutRecord]) -> Self {
    let oldest = records.iter().map(WorkoutRecord::instant).min();
    Self::new(reference, oldest)
  }

  fn four_week_window(index: u32, start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
    TimeWindow {
      start,
      end,
      label: format!("[{}-{} weeks ago]", index * 4 + 1, index * 4 + 4),
      weeks: FOUR_WEEK_BUCKET_WEEKS,
    }
  }

  fn year_window(index: u32, start: DateTime<Utc>, end: DateTime<Utc>) -> TimeWindow {
    TimeWindow {
      start,
      end,
      label: format!("[{}-{} years ago]", index, index + 1),
      weeks: YEAR_BUCKET_WEEKS,
    }
  }
}

impl Iterator for BucketPlan {
  type Item = TimeWindow;

  fn next(&mut self) -> Option<TimeWindow> {
    loop {
      match self.phase {
        Phase::FourWeek { index, end } => {
          if end <= self.oldest {
            self.phase = Phase::Done;
            return None;
          }

          let start = days_back(end, FOUR_WEEK_BUCKET_DAYS);
          if start < self.year_cutoff {
            debug!(buckets = index - 1, %end, "Switching to yearly buckets");
            self.phase = Phase::Year { index: 1, end };
            continue;
          }

          self.phase = Phase::FourWeek { index: index + 1, end: start };
          let window = Self::four_week_window(index, start, end);
          trace!(label = %window.label, %start, %end, "Planned bucket");
          return Some(window);
        }
        Phase::Year { index, end } => {
          if end <= self.oldest {
            self.phase = Phase::Done;
            return None;
          }

          let start = days_back(end, YEAR_BUCKET_DAYS);
          self.phase = Phase::Year { index: index + 1, end: start };
          let window = Self::year_window(index, start, end);
          trace!(label = %window.label, %start, %end, "Planned bucket");
          return Some(window);
        }
        Phase::Done => return None,
      }
    }
  }
}

impl FusedIterator for BucketPlan {}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
