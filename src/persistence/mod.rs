//! Persistence layer
//!
//! Stores a graph as a plain-text adjacency list and loads it back into a
//! [`GraphStore`](crate::graph::GraphStore). The analysis core never touches
//! files itself.

pub mod adjacency;

pub use adjacency::{load_from_path, read_adjacency, save_to_path, write_adjacency};

use crate::graph::GraphError;
use thiserror::Error;

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line that is not a vertex or an edge
    #[error("Malformed adjacency line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    /// Edge weight that is zero or negative
    #[error("Invalid weight {weight} on line {line}: weights must be positive")]
    InvalidWeight { line: usize, weight: i64 },

    /// Vertex that cannot be represented in the text format
    #[error("Vertex {0:?} is empty, padded with whitespace or contains a tab or newline")]
    InvalidToken(String),

    /// Graph error
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
