//! Immutable graph snapshot used by every analysis
//!
//! Produced by [`GraphStore::freeze`](super::GraphStore::freeze). Once frozen
//! the graph cannot change, so analyses may share it across threads freely.

use super::store::{Adjacency, GraphError, GraphResult};
use super::types::{Address, Vertex, Weight};
use crate::algo::build_view;
use mailgraph_algorithms::{GraphView, NodeId};
use rustc_hash::FxHashMap;
use tracing::info;

/// Frozen weighted directed graph
///
/// Vertex `i` (insertion order) is `NodeId` `i` in the algorithm view.
#[derive(Debug, Clone)]
pub struct Graph<V = Address> {
    vertices: Vec<V>,
    index: FxHashMap<V, usize>,
    view: GraphView,
}

impl<V: Vertex> Graph<V> {
    pub(crate) fn from_parts(
        vertices: Vec<V>,
        index: FxHashMap<V, usize>,
        outgoing: Vec<Adjacency>,
    ) -> Self {
        let view = build_view(&outgoing);
        info!(
            "Frozen graph: {} vertices, {} edges, {} messages",
            view.node_count,
            view.edge_count(),
            view.total_weight()
        );
        Graph {
            vertices,
            index,
            view,
        }
    }

    /// The dense CSR projection the algorithms run on
    pub fn view(&self) -> &GraphView {
        &self.view
    }

    /// Algorithm NodeId of a vertex
    pub fn node_id(&self, vertex: &V) -> GraphResult<NodeId> {
        self.index_of(vertex).map(|idx| idx as NodeId)
    }

    /// Vertex token of an algorithm NodeId
    pub fn vertex(&self, node: NodeId) -> Option<&V> {
        usize::try_from(node).ok().and_then(|idx| self.vertices.get(idx))
    }

    pub(crate) fn vertex_at(&self, idx: usize) -> &V {
        &self.vertices[idx]
    }

    pub(crate) fn index_of(&self, vertex: &V) -> GraphResult<usize> {
        self.index
            .get(vertex)
            .copied()
            .ok_or_else(|| GraphError::UnknownVertex(vertex.to_string()))
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.index.contains_key(vertex)
    }

    /// Outgoing `(target, weight)` pairs in first-seen order
    pub fn neighbors(&self, vertex: &V) -> GraphResult<Vec<(&V, Weight)>> {
        let idx = self.index_of(vertex)?;
        Ok(self
            .view
            .successors(idx)
            .iter()
            .zip(self.view.weights(idx))
            .map(|(&t, &w)| (&self.vertices[t], w))
            .collect())
    }

    /// Sum of outgoing weights (messages sent)
    pub fn out_degree(&self, vertex: &V) -> GraphResult<Weight> {
        self.index_of(vertex).map(|idx| self.view.weighted_out_degree(idx))
    }

    /// Sum of incoming weights (messages received)
    pub fn in_degree(&self, vertex: &V) -> GraphResult<Weight> {
        self.index_of(vertex).map(|idx| self.view.weighted_in_degree(idx))
    }

    /// Number of distinct recipients
    pub fn distinct_out_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.index_of(vertex).map(|idx| self.view.out_degree(idx))
    }

    /// Number of distinct senders
    pub fn distinct_in_degree(&self, vertex: &V) -> GraphResult<usize> {
        self.index_of(vertex).map(|idx| self.view.in_degree(idx))
    }

    /// All vertices, in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }

    /// All edges as `(source, target, weight)` triples
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V, Weight)> {
        (0..self.view.node_count).flat_map(move |s| {
            self.view
                .successors(s)
                .iter()
                .zip(self.view.weights(s))
                .map(move |(&t, &w)| (&self.vertices[s], &self.vertices[t], w))
        })
    }

    /// Number of vertices
    pub fn order(&self) -> usize {
        self.view.node_count
    }

    /// Number of distinct directed edges
    pub fn size(&self) -> usize {
        self.view.edge_count()
    }

    /// Sum of all edge weights (total messages)
    pub fn total_weight(&self) -> Weight {
        self.view.total_weight()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
