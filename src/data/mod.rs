//! Paired dataset handling
//!
//! Ordering and splitting of positionally paired feature/label sequences.

pub mod dataset;

pub use dataset::{randomise_order, split_index};
