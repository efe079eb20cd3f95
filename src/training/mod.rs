//! Training-call plumbing and metrics
//!
//! The trainer marshals in-memory data into burn tensors, splits by index,
//! and runs the configured optimizer; metrics summarize the outcome.

pub mod metrics;
pub mod trainer;

pub use metrics::{classification_report, ClassMetrics, ConfusionMatrix, TrainingHistory};
pub use trainer::{NetworkTrainer, DEFAULT_HIDDEN, DEFAULT_SPLIT};
