//! Communication graph storage
//!
//! Vertices are participant addresses, a directed edge means "sent a message
//! to", and the edge weight counts those messages. Build a [`GraphStore`]
//! edge by edge, then [`freeze`](GraphStore::freeze) it into a [`Graph`]
//! before analysis.

pub mod frozen;
pub mod store;
pub mod types;

// Re-export main types
pub use frozen::Graph;
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{Address, Vertex, Weight};
