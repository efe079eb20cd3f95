//! Label encoding
//!
//! Converts arbitrary class labels into dense integer codes and back.

pub mod encoding;

pub use encoding::{enumerate_labels, LabelEncoder};
