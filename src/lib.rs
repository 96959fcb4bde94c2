//! Multi-resolution training history summaries
//!
//! Condenses an arbitrarily long workout log into a bounded text block for
//! prompt context: the last four weeks run by run, then 4-week buckets back
//! to one year, then yearly buckets for everything older.

pub mod aggregate;
pub mod buckets;
pub mod config;
pub mod history;
pub mod models;
pub mod normalize;
pub mod render;

#[cfg(test)]
mod test_utils;

pub use config::{ConfigError, HistoryConfig};
pub use history::{
  build_history_context, build_history_context_from_values, summarize_json, summarize_workouts,
  summarize_workouts_now, HistoryContext, HistoryError,
};
pub use models::{BucketSummary, RawWorkout, TimeWindow, WorkoutRecord};
pub use render::format_number;
