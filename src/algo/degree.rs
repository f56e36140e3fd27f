//! Degree statistics
//!
//! Order, size, isolated vertices and top-K rankings by weighted degree
//! (messages sent / received).

use crate::graph::{Graph, Vertex, Weight};
use serde::Serialize;

/// Summary of a graph's degree structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeStatistics<V> {
    /// Number of vertices
    pub order: usize,
    /// Number of distinct directed edges
    pub size: usize,
    /// Sum of all edge weights
    pub total_weight: Weight,
    /// Vertices with no incoming and no outgoing edge, ascending
    pub isolated: Vec<V>,
    /// Top vertices by messages sent
    pub top_out: Vec<(V, Weight)>,
    /// Top vertices by messages received
    pub top_in: Vec<(V, Weight)>,
}

impl<V: Vertex> Graph<V> {
    /// Vertices with zero in- and out-degree, sorted ascending.
    ///
    /// Always empty unless the store was seeded with vertices that never
    /// appeared in an edge.
    pub fn isolated_vertices(&self) -> Vec<V> {
        let view = self.view();
        let mut isolated: Vec<V> = (0..view.node_count)
            .filter(|&idx| view.out_degree(idx) == 0 && view.in_degree(idx) == 0)
            .map(|idx| self.vertex_at(idx).clone())
            .collect();
        isolated.sort();
        isolated
    }

    /// The `k` vertices with the most messages sent.
    ///
    /// Ties are broken by vertex ascending.
    pub fn top_k_by_out_degree(&self, k: usize) -> Vec<(V, Weight)> {
        self.top_k(k, |idx| self.view().weighted_out_degree(idx))
    }

    /// The `k` vertices with the most messages received.
    ///
    /// Ties are broken by vertex ascending.
    pub fn top_k_by_in_degree(&self, k: usize) -> Vec<(V, Weight)> {
        self.top_k(k, |idx| self.view().weighted_in_degree(idx))
    }

    fn top_k<F>(&self, k: usize, degree: F) -> Vec<(V, Weight)>
    where
        F: Fn(usize) -> Weight,
    {
        let mut ranked: Vec<(usize, Weight)> =
            (0..self.order()).map(|idx| (idx, degree(idx))).collect();
        ranked.sort_by(|a, b| {
            b.1.cmp(&a.1)
                .then_with(|| self.vertex_at(a.0).cmp(self.vertex_at(b.0)))
        });
        ranked.truncate(k);
        ranked
            .into_iter()
            .map(|(idx, d)| (self.vertex_at(idx).clone(), d))
            .collect()
    }

    /// Compute every degree statistic at once
    pub fn degree_statistics(&self, k: usize) -> DegreeStatistics<V> {
        DegreeStatistics {
            order: self.order(),
            size: self.size(),
            total_weight: self.total_weight(),
            isolated: self.isolated_vertices(),
            top_out: self.top_k_by_out_degree(k),
            top_in: self.top_k_by_in_degree(k),
        }
    }
}
