//! Analysis configuration
//!
//! Loaded from YAML; every key is optional and falls back to [`Default`].
//!
//! ```yaml
//! top_k: 20
//! max_distance: 10
//! parallel: true
//! threads: 8
//! progress_interval: 10
//! balance_metric: weighted   # or: distinct
//! vertex_universe: edges     # or: declared
//! log_level: info
//! ```

use crate::algo::BalanceMetric;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which addresses become vertices during ingestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexUniverse {
    /// Only addresses that appear in some edge
    #[default]
    Edges,
    /// Every address seen in a message header, even without an edge
    Declared,
}

/// Analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Length of the degree rankings
    pub top_k: usize,
    /// Default bound for the distance query
    pub max_distance: u64,
    /// Run the diameter sweep on the rayon pool
    pub parallel: bool,
    /// Worker threads for the diameter sweep (None = rayon default)
    pub threads: Option<usize>,
    /// Log diameter progress every N sources (0 disables)
    pub progress_interval: usize,
    /// Degree metric for the Eulerian balance condition
    pub balance_metric: BalanceMetric,
    pub vertex_universe: VertexUniverse,
    /// Default log level for the CLI (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: 20,
            max_distance: 10,
            parallel: true,
            threads: None,
            progress_interval: 10,
            balance_metric: BalanceMetric::Weighted,
            vertex_universe: VertexUniverse::Edges,
            log_level: "info".to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
