//! Classification over arbitrary labels
//!
//! Composes the label encoder with the generic trainer and scores test data.

pub mod classifier;

pub use classifier::{Classification, Classifier};
