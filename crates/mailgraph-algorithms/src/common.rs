//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// Edge weight: accumulated message count, always >= 1 in a well-formed view.
pub type Weight = u64;

/// A dense, integer-indexed view of a weighted directed graph using Compressed Sparse Row (CSR) format.
///
/// Every ordered `(source, target)` pair appears at most once; parallel
/// occurrences have already been merged into the edge weight by the builder.
#[derive(Debug, Clone)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Outgoing edges CSR structure
    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,
    /// Edge weights: aligned with `out_targets`
    pub out_weights: Vec<Weight>,

    /// Incoming edges CSR structure (Compressed Sparse Column effectively)
    /// Offsets into `in_sources`. Size = node_count + 1
    pub in_offsets: Vec<usize>,
    /// Contiguous array of source node indices
    pub in_sources: Vec<usize>,
    /// Edge weights: aligned with `in_sources`
    pub in_weights: Vec<Weight>,
}

impl GraphView {
    /// Get the number of distinct successors of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get the number of distinct predecessors of a node (by index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Sum of the weights leaving a node
    pub fn weighted_out_degree(&self, idx: usize) -> Weight {
        self.weights(idx).iter().sum()
    }

    /// Sum of the weights entering a node
    pub fn weighted_in_degree(&self, idx: usize) -> Weight {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        self.in_weights[start..end].iter().sum()
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get incoming neighbors (predecessors) of a node
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        let start = self.in_offsets[idx];
        let end = self.in_offsets[idx + 1];
        &self.in_sources[start..end]
    }

    /// Get weights for outgoing edges of a node, aligned with [`GraphView::successors`]
    pub fn weights(&self, idx: usize) -> &[Weight] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_weights[start..end]
    }

    /// Number of distinct directed edges
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    /// Sum of all edge weights
    pub fn total_weight(&self) -> Weight {
        self.out_weights.iter().sum()
    }

    /// Build a view from per-node weighted adjacency lists.
    ///
    /// `outgoing[i]` holds `(target_index, weight)` pairs for node `i`, in the
    /// order they should be visited. The incoming side is derived.
    pub fn from_adjacency_list(
        index_to_node: Vec<NodeId>,
        outgoing: Vec<Vec<(usize, Weight)>>,
    ) -> Self {
        let node_count = index_to_node.len();
        let node_to_index = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, &id)| (id, idx))
            .collect();

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut out_weights = Vec::new();
        let mut in_counts = vec![0usize; node_count];

        out_offsets.push(0);
        for neighbors in &outgoing {
            for &(target, weight) in neighbors {
                out_targets.push(target);
                out_weights.push(weight);
                in_counts[target] += 1;
            }
            out_offsets.push(out_targets.len());
        }

        // Counting sort of the edges by target gives the transposed CSR.
        let mut in_offsets = Vec::with_capacity(node_count + 1);
        in_offsets.push(0);
        for count in &in_counts {
            let last = in_offsets[in_offsets.len() - 1];
            in_offsets.push(last + count);
        }

        let edge_count = out_targets.len();
        let mut in_sources = vec![0usize; edge_count];
        let mut in_weights = vec![0; edge_count];
        let mut cursor = in_offsets.clone();
        for (source, neighbors) in outgoing.iter().enumerate() {
            for &(target, weight) in neighbors {
                let slot = cursor[target];
                in_sources[slot] = source;
                in_weights[slot] = weight;
                cursor[target] += 1;
            }
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            out_offsets,
            out_targets,
            out_weights,
            in_offsets,
            in_sources,
            in_weights,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build a view whose NodeIds equal their dense indices.
    pub(crate) fn view_from_edges(node_count: usize, edges: &[(usize, usize, Weight)]) -> GraphView {
        let mut outgoing = vec![Vec::new(); node_count];
        for &(u, v, w) in edges {
            outgoing[u].push((v, w));
        }
        GraphView::from_adjacency_list((0..node_count as u64).collect(), outgoing)
    }

    #[test]
    fn test_csr_degrees() {
        // 0 -> 1 (3), 0 -> 2 (1), 2 -> 1 (2)
        let view = view_from_edges(3, &[(0, 1, 3), (0, 2, 1), (2, 1, 2)]);

        assert_eq!(view.edge_count(), 3);
        assert_eq!(view.total_weight(), 6);
        assert_eq!(view.successors(0), &[1, 2]);
        assert_eq!(view.weights(0), &[3, 1]);
        assert_eq!(view.out_degree(0), 2);
        assert_eq!(view.weighted_out_degree(0), 4);
        assert_eq!(view.in_degree(1), 2);
        assert_eq!(view.weighted_in_degree(1), 5);
        assert_eq!(view.predecessors(1), &[0, 2]);
        assert_eq!(view.weighted_in_degree(0), 0);
    }

    #[test]
    fn test_weight_conservation() {
        let view = view_from_edges(4, &[(0, 1, 2), (1, 2, 5), (2, 0, 1), (3, 3, 4)]);
        let out: Weight = (0..4).map(|i| view.weighted_out_degree(i)).sum();
        let inc: Weight = (0..4).map(|i| view.weighted_in_degree(i)).sum();
        assert_eq!(out, inc);
        assert_eq!(out, view.total_weight());
    }
}
