//! Network architecture
//!
//! A plain feed-forward stack built from a layer-size list.

pub mod mlp;

pub use mlp::FeedForward;
