//! Mailgraph
//!
//! Analysis of a weighted, directed communication graph built from mail
//! headers: who writes to whom, and how often.
//!
//! # Layers
//!
//! - [`graph`]: the mutable [`GraphStore`] used while ingesting, and the
//!   immutable [`Graph`] it freezes into for analysis
//! - [`algo`]: degree rankings, strongly connected components, the Eulerian
//!   check, bounded shortest paths and the diameter
//! - [`ingest`]: mail-folder walking and header parsing
//! - [`persistence`]: tab-separated adjacency lists
//! - [`config`]: YAML analysis settings
//!
//! The algorithms themselves live in the `mailgraph-algorithms` crate and
//! operate on a compact index-based view; this crate maps results back to
//! vertex tokens.
//!
//! ## Example Usage
//!
//! ```rust
//! use mailgraph::{Address, GraphStore};
//!
//! let mut store = GraphStore::new();
//! store.add_edge(Address::from("alice@example.com"), Address::from("bob@example.com"));
//! store.add_edge(Address::from("bob@example.com"), Address::from("alice@example.com"));
//! store.add_edge(Address::from("alice@example.com"), Address::from("bob@example.com"));
//!
//! let graph = store.freeze();
//! assert_eq!(graph.out_degree(&Address::from("alice@example.com")).unwrap(), 2);
//! assert_eq!(graph.strongly_connected_components().count(), 1);
//!
//! // alice -> bob weighs 2, bob -> alice weighs 1
//! let diameter = graph.diameter();
//! assert_eq!(diameter.value, 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod graph;
pub mod ingest;
pub mod persistence;

// Re-export main types for convenience
pub use graph::{Address, Graph, GraphError, GraphResult, GraphStore, Vertex, Weight};

pub use algo::{
    BalanceMetric, Components, DegreeStatistics, Diameter, DiameterOptions, EulerianReport,
    Path, Reached, ShortestPaths, VertexImbalance,
};

pub use config::{AnalysisConfig, ConfigError, ConfigResult, VertexUniverse};

pub use ingest::{ingest_dir, parse_message, IngestError, IngestResult, IngestSummary, MessageHeader};

pub use persistence::{
    load_from_path, read_adjacency, save_to_path, write_adjacency, PersistenceError,
    PersistenceResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
