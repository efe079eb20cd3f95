//! Thin training and classification wrapper over burn
//!
//! Wraps feed-forward network construction and training-call plumbing behind
//! a small API: a generic [`training::NetworkTrainer`], a label-indexing
//! [`predict::Classifier`], and helpers for shuffling paired data and
//! enumerating labels. All gradient optimization and inference is delegated
//! to burn; this crate only marshals arguments, splits data by index, and
//! keeps the label-to-code bijection.

pub mod data;
pub mod features;
pub mod model;
pub mod predict;
pub mod training;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Crate-wide errors
#[derive(Debug, Error)]
pub enum AnnError {
    #[error("x_data and y_data lengths differ: {x_len} vs {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("training data is empty")]
    EmptyDataset,

    #[error("network not trained - call train first")]
    NotTrained,

    #[error("unknown label: {0}")]
    UnknownLabel(String),

    #[error("no label recorded for class code {0}")]
    UnknownCode(usize),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnnError>;

/// Which loss pairing the trainer builds the network for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    /// Softmax cross-entropy over integer class codes
    Classification,
    /// Mean-squared error against the targets as scalar values
    Regression,
}

/// Gradient optimizer selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    Sgd,
    Adam,
}

/// Training configuration
///
/// Stored as-is at construction; no validation is performed. `momentum`
/// only applies to [`OptimizerKind::Sgd`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub network: NetworkKind,
    pub optimizer: OptimizerKind,
    pub learning_rate: f64,
    pub momentum: f64,
    pub epochs: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            network: NetworkKind::Classification,
            optimizer: OptimizerKind::Sgd,
            learning_rate: 0.01,
            momentum: 0.5,
            epochs: 100,
        }
    }
}

impl TrainConfig {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnnError::Config(format!("Failed to read config file {}: {}", path, e)))?;
        toml::from_str(&content)
            .map_err(|e| AnnError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnnError::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
