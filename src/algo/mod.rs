//! Graph algorithms module
//!
//! Algorithms are implemented in the `mailgraph-algorithms` crate over a
//! dense [`GraphView`]. This module provides the integration/adapter layer:
//! it projects a store into that view and maps results back to vertex tokens.

pub mod connectivity;
pub mod degree;
pub mod diameter;
pub mod pathfinding;

use crate::graph::store::Adjacency;
use mailgraph_algorithms::{GraphView, NodeId};

// Re-export algorithms
pub use mailgraph_algorithms::{
    strongly_connected_components, SccResult,
    eulerian_circuit_check, BalanceMetric, EulerianResult, EulerianViolation,
    single_source_shortest_paths, dijkstra, ShortestPathTree, PathResult,
    DiameterConfig, DiameterResult,
};

pub use connectivity::{Components, EulerianReport, VertexImbalance};
pub use degree::DegreeStatistics;
pub use diameter::{Diameter, DiameterOptions};
pub use pathfinding::{Path, Reached, ShortestPaths};

/// Build a GraphView from per-vertex adjacency for algorithm execution.
///
/// NodeIds are the dense insertion indices, so `index_to_node[i] == i`.
pub(crate) fn build_view(outgoing: &[Adjacency]) -> GraphView {
    let index_to_node: Vec<NodeId> = (0..outgoing.len() as NodeId).collect();
    let adjacency = outgoing
        .iter()
        .map(|adj| adj.iter().map(|(&t, &w)| (t, w)).collect())
        .collect();
    GraphView::from_adjacency_list(index_to_node, adjacency)
}
