pub mod engine;
pub mod matcher;
pub mod ordering;
pub mod outcome;

pub use engine::classify_rows;
pub use ordering::sort_by_priority;
pub use outcome::{Assignment, ClassificationResult, ClassifiedRow};
