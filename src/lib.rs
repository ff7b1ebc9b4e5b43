pub mod error;
pub mod geometry;
pub mod progress;
pub mod douglas_peucker;
pub mod points_csv;
pub mod config;
pub mod output;
pub mod run;

pub use douglas_peucker::{
    summarize,
    summarize_indices,
    summarize_indices_par,
    summarize_indices_with,
    summarize_par,
    summarize_with};
pub use error::SummaryError;
pub use geometry::{deviation_sq, Point};
pub use progress::{LogProgress, NoProgress, ProgressReporter, RecordingProgress};
