//! Graph algorithms for weighted directed communication graphs
//!
//! All algorithms run over a [`GraphView`], a dense CSR projection whose
//! edge weights are accumulated message counts.

pub mod common;
pub mod components;
pub mod eulerian;
pub mod pathfinding;
pub mod diameter;

pub use common::{GraphView, NodeId, Weight};
pub use components::{strongly_connected_components, strongly_connected_components_where, SccResult};
pub use eulerian::{eulerian_circuit_check, BalanceMetric, EulerianResult, EulerianViolation, Imbalance};
pub use pathfinding::{dijkstra, single_source_shortest_paths, PathEntry, PathResult, ShortestPathTree};
pub use diameter::{diameter, DiameterConfig, DiameterResult};
