pub mod summary;
pub mod workout;

pub use summary::{BucketSummary, TimeWindow};
pub use workout::{RawWorkout, WorkoutRecord};
