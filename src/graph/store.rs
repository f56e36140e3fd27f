//! In-memory graph storage implementation
//!
//! A weighted directed multigraph collapsed into simple edges: each ordered
//! `(source, target)` pair is stored once and repeated occurrences bump its
//! weight. Vertices are created implicitly by the first edge that mentions
//! them, or explicitly through [`GraphStore::add_vertex`].

use super::frozen::Graph;
use super::types::{Address, Vertex, Weight};
use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GraphError {
    #[error("Unknown vertex: {0}")]
    UnknownVertex(String),

    #[error("Invalid weight {weight} for edge {from} -> {to}: weights must be positive")]
    InvalidWeight {
        from: String,
        to: String,
        weight: Weight,
    },

    #[error("Adding weight {weight} to edge {from} -> {to} overflows the total message count")]
    WeightOverflow {
        from: String,
        to: String,
        weight: Weight,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Per-vertex outgoing adjacency, keyed by target index.
///
/// Insertion ordered, so neighbours come back in the order their first
/// message was seen.
pub(crate) type Adjacency = IndexMap<usize, Weight, FxBuildHasher>;

/// Mutable, append-only graph storage
///
/// Uses dense indices internally:
/// - vertices: index -> token
/// - index: token -> index
/// - outgoing: index -> (target index -> weight)
/// - in_weight / in_distinct: running incoming counters per index
///
/// Call [`GraphStore::freeze`] before running any analysis.
#[derive(Debug, Clone)]
pub struct GraphStore<V = Address> {
    vertices: Vec<V>,
    index: FxHashMap<V, usize>,
    outgoing: Vec<Adjacency>,
    in_weight: Vec<Weight>,
    in_distinct: Vec<usize>,
    edge_count: usize,
    total_weight: Weight,
}

impl<V: Vertex> Default for GraphStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Vertex> GraphStore<V> {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            vertices: Vec::new(),
            index: FxHashMap::default(),
            outgoing: Vec::new(),
            in_weight: Vec::new(),
            in_distinct: Vec::new(),
            edge_count: 0,
            total_weight: 0,
        }
    }

    /// Insert a vertex if absent and return its dense index.
    ///
    /// Seeding a vertex that never appears in an edge makes it isolated.
    pub fn add_vertex(&mut self, vertex: V) -> usize {
        if let Some(&idx) = self.index.get(&vertex) {
            return idx;
        }
        let idx = self.vertices.len();
        self.index.insert(vertex.clone(), idx);
        self.vertices.push(vertex);
        self.outgoing.push(Adjacency::default());
        self.in_weight.push(0);
        self.in_distinct.push(0);
        idx
    }

    /// Record one message from `source` to `target`.
    ///
    /// Creates both endpoints if needed; an existing edge gets its weight
    /// incremented instead of a parallel edge. Self-loops are allowed.
    ///
    /// If the store already holds `u64::MAX` messages the edge is dropped
    /// with a warning; use [`GraphStore::add_weighted_edge`] to observe it.
    pub fn add_edge(&mut self, source: V, target: V) {
        if let Err(e) = self.add_weighted_edge(source, target, 1) {
            warn!("{}", e);
        }
    }

    /// Record `weight` messages from `source` to `target` at once.
    ///
    /// Every per-edge and per-vertex sum is bounded by the total, so a total
    /// that fits in a `u64` keeps every degree sum in range. A rejected edge
    /// leaves the store untouched.
    pub fn add_weighted_edge(&mut self, source: V, target: V, weight: Weight) -> GraphResult<()> {
        if weight == 0 {
            return Err(GraphError::InvalidWeight {
                from: source.to_string(),
                to: target.to_string(),
                weight,
            });
        }
        let Some(total) = self.total_weight.checked_add(weight) else {
            return Err(GraphError::WeightOverflow {
                from: source.to_string(),
                to: target.to_string(),
                weight,
            });
        };
        let s = self.add_vertex(source);
        let t = self.add_vertex(target);
        self.accumulate(s, t, weight);
        self.total_weight = total;
        Ok(())
    }

    fn accumulate(&mut self, s: usize, t: usize, weight: Weight) {
        let adjacency = &mut self.outgoing[s];
        match adjacency.get_mut(&t) {
            Some(existing) => *existing += weight,
            None => {
                adjacency.insert(t, weight);
                self.edge_count += 1;
                self.in_distinct[t] += 1;
            }
        }
        self.in_weight[t] += weight;
    }

    fn index_of(&self, vertex: &V) -> GraphResult<usize> {
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
        Ok(self.outgoing[idx]
            .iter()
            .map(|(&t, &w)| (&self.vertices[t], w))
            .collect())
    }

    /// Sum of outgoing weights (messages sent)
    pub fn out_degree(&self, vertex: &V) -> GraphResult<Weight> {
        let idx = self.index_of(vertex)?;
        Ok(self.outgoing[idx].values().sum())
    }

    /// Sum of incoming weights (messages received)
    pub fn in_degree(&self, vertex: &V) -> GraphResult<Weight> {
        let idx = self.index_of(vertex)?;
        Ok(self.in_weight[idx])
    }

    /// Number of distinct recipients
    pub fn distinct_out_degree(&self, vertex: &V) -> GraphResult<usize> {
        let idx = self.index_of(vertex)?;
        Ok(self.outgoing[idx].len())
    }

    /// Number of distinct senders
    pub fn distinct_in_degree(&self, vertex: &V) -> GraphResult<usize> {
        let idx = self.index_of(vertex)?;
        Ok(self.in_distinct[idx])
    }

    /// All vertices, in insertion order
    pub fn vertices(&self) -> impl Iterator<Item = &V> {
        self.vertices.iter()
    }

    /// All edges as `(source, target, weight)` triples
    pub fn edges(&self) -> impl Iterator<Item = (&V, &V, Weight)> {
        self.outgoing.iter().enumerate().flat_map(move |(s, adj)| {
            adj.iter()
                .map(move |(&t, &w)| (&self.vertices[s], &self.vertices[t], w))
        })
    }

    /// Number of vertices
    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    /// Number of distinct directed edges
    pub fn size(&self) -> usize {
        self.edge_count
    }

    /// Sum of all edge weights (total messages)
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consume the store and produce an immutable, shareable [`Graph`].
    pub fn freeze(self) -> Graph<V> {
        Graph::from_parts(self.vertices, self.index, self.outgoing)
    }
}

impl<V: Vertex> FromIterator<(V, V)> for GraphStore<V> {
    fn from_iter<I: IntoIterator<Item = (V, V)>>(iter: I) -> Self {
        let mut store = GraphStore::new();
        for (source, target) in iter {
            store.add_edge(source, target);
        }
        store
    }
}

impl<V: Vertex> Extend<(V, V)> for GraphStore<V> {
    fn extend<I: IntoIterator<Item = (V, V)>>(&mut self, iter: I) {
        for (source, target) in iter {
            self.add_edge(source, target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        Address::from(s)
    }

    #[test]
    fn test_weight_accumulation() {
        let mut store = GraphStore::new();
        for _ in 0..5 {
            store.add_edge(addr("alice"), addr("bob"));
        }

        assert_eq!(store.order(), 2);
        assert_eq!(store.size(), 1);
        assert_eq!(store.total_weight(), 5);
        assert_eq!(store.out_degree(&addr("alice")).unwrap(), 5);
        assert_eq!(store.in_degree(&addr("bob")).unwrap(), 5);
        assert_eq!(store.distinct_out_degree(&addr("alice")).unwrap(), 1);
        assert_eq!(store.distinct_in_degree(&addr("bob")).unwrap(), 1);
        assert_eq!(store.neighbors(&addr("alice")).unwrap(), vec![(&addr("bob"), 5)]);
    }

    #[test]
    fn test_neighbors_keep_first_seen_order() {
        let mut store = GraphStore::new();
        store.add_edge(addr("a"), addr("z"));
        store.add_edge(addr("a"), addr("b"));
        store.add_edge(addr("a"), addr("z"));

        let neighbors = store.neighbors(&addr("a")).unwrap();
        assert_eq!(neighbors, vec![(&addr("z"), 2), (&addr("b"), 1)]);
        assert!(store.neighbors(&addr("b")).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_vertex() {
        let store: GraphStore = GraphStore::new();
        assert_eq!(
            store.neighbors(&addr("ghost")),
            Err(GraphError::UnknownVertex("ghost".to_string()))
        );
        assert!(store.in_degree(&addr("ghost")).is_err());
        assert!(store.out_degree(&addr("ghost")).is_err());
    }

    #[test]
    fn test_self_loop() {
        let mut store = GraphStore::new();
        store.add_edge(addr("me"), addr("me"));
        store.add_edge(addr("me"), addr("me"));

        assert_eq!(store.order(), 1);
        assert_eq!(store.size(), 1);
        assert_eq!(store.out_degree(&addr("me")).unwrap(), 2);
        assert_eq!(store.in_degree(&addr("me")).unwrap(), 2);
    }

    #[test]
    fn test_invalid_weight() {
        let mut store = GraphStore::new();
        let result = store.add_weighted_edge(addr("a"), addr("b"), 0);
        assert!(matches!(result, Err(GraphError::InvalidWeight { weight: 0, .. })));
        // Rejected before touching the store
        assert!(store.is_empty());

        store.add_weighted_edge(addr("a"), addr("b"), 3).unwrap();
        store.add_edge(addr("a"), addr("b"));
        assert_eq!(store.out_degree(&addr("a")).unwrap(), 4);
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_weight_overflow_is_rejected() {
        let mut store = GraphStore::new();
        store.add_weighted_edge(addr("a"), addr("b"), u64::MAX - 1).unwrap();

        let err = store.add_weighted_edge(addr("c"), addr("b"), 2).unwrap_err();
        assert!(matches!(err, GraphError::WeightOverflow { weight: 2, .. }));
        assert!(!store.contains(&addr("c")));

        store.add_edge(addr("a"), addr("b"));
        assert_eq!(store.total_weight(), u64::MAX);
        store.add_edge(addr("a"), addr("b"));
        assert_eq!(store.out_degree(&addr("a")).unwrap(), u64::MAX);
        assert_eq!(store.in_degree(&addr("b")).unwrap(), u64::MAX);
    }

    #[test]
    fn test_seeded_vertex_is_isolated() {
        let mut store = GraphStore::new();
        let idx = store.add_vertex(addr("lonely"));
        assert_eq!(store.add_vertex(addr("lonely")), idx);
        store.add_edge(addr("a"), addr("b"));

        assert_eq!(store.order(), 3);
        assert_eq!(store.out_degree(&addr("lonely")).unwrap(), 0);
        assert_eq!(store.in_degree(&addr("lonely")).unwrap(), 0);
    }

    #[test]
    fn test_degree_conservation() {
        let store: GraphStore<&str> = vec![("a", "b"), ("b", "c"), ("a", "b"), ("c", "a"), ("c", "c")]
            .into_iter()
            .collect();

        let out: Weight = store.vertices().map(|v| store.out_degree(v).unwrap()).sum();
        let inc: Weight = store.vertices().map(|v| store.in_degree(v).unwrap()).sum();
        assert_eq!(out, inc);
        assert_eq!(out, store.total_weight());
        assert_eq!(store.edges().count(), store.size());
    }

    #[test]
    fn test_generic_vertex_tokens() {
        let mut store: GraphStore<u32> = GraphStore::new();
        store.add_edge(1, 2);
        store.add_edge(2, 1);
        assert_eq!(store.order(), 2);
        assert_eq!(store.edges().collect::<Vec<_>>(), vec![(&1, &2, 1), (&2, &1, 1)]);
    }
}
