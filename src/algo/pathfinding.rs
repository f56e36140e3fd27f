//! Shortest-path queries in vertex tokens
//!
//! Edge weights act as path costs here, the opposite reading of the
//! "frequency" semantics used by degree statistics: a frequently used link
//! is a *long* link. Costs are the plain sum of stored weights.

use crate::graph::{Graph, GraphResult, Vertex, Weight};
use mailgraph_algorithms::{dijkstra, single_source_shortest_paths};
use serde::Serialize;
use std::collections::HashMap;

/// A vertex reached by a shortest-path search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reached<V> {
    pub distance: Weight,
    /// `None` only for the source
    pub predecessor: Option<V>,
}

/// Shortest-path tree from one source, bounded by `max_distance` if set.
///
/// Unreachable vertices and vertices farther than the bound are absent.
#[derive(Debug, Clone, Serialize)]
pub struct ShortestPaths<V> {
    pub source: V,
    pub max_distance: Option<Weight>,
    reached: HashMap<V, Reached<V>>,
}

impl<V: Vertex> ShortestPaths<V> {
    pub fn distance(&self, vertex: &V) -> Option<Weight> {
        self.reached.get(vertex).map(|r| r.distance)
    }

    pub fn predecessor(&self, vertex: &V) -> Option<&V> {
        self.reached.get(vertex).and_then(|r| r.predecessor.as_ref())
    }

    pub fn get(&self, vertex: &V) -> Option<&Reached<V>> {
        self.reached.get(vertex)
    }

    pub fn contains(&self, vertex: &V) -> bool {
        self.reached.contains_key(vertex)
    }

    /// Number of reached vertices, source included
    pub fn len(&self) -> usize {
        self.reached.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reached.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, &Reached<V>)> {
        self.reached.iter()
    }

    /// Source-to-target vertex sequence, if `target` was reached
    pub fn path_to(&self, target: &V) -> Option<Vec<V>> {
        let mut current = self.reached.get(target)?;
        let mut path = vec![target.clone()];
        while let Some(prev) = &current.predecessor {
            path.push(prev.clone());
            current = self.reached.get(prev)?;
        }
        path.reverse();
        Some(path)
    }

    /// Reached vertices sorted by distance, then vertex ascending
    pub fn within(&self) -> Vec<(V, Weight)> {
        let mut list: Vec<(V, Weight)> = self
            .reached
            .iter()
            .map(|(v, r)| (v.clone(), r.distance))
            .collect();
        list.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        list
    }
}

/// A single shortest path between two vertices
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path<V> {
    pub source: V,
    pub target: V,
    pub vertices: Vec<V>,
    pub cost: Weight,
}

impl<V> Path<V> {
    /// Number of vertices on the path
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl<V: Vertex> Graph<V> {
    /// Single-source shortest paths, bounded by `max_distance` when given.
    ///
    /// Fails with `UnknownVertex` if `source` is not in the graph.
    pub fn shortest_paths(
        &self,
        source: &V,
        max_distance: Option<Weight>,
    ) -> GraphResult<ShortestPaths<V>> {
        let source_id = self.node_id(source)?;
        let reached = single_source_shortest_paths(self.view(), source_id, max_distance)
            .map(|tree| {
                tree.entries
                    .into_iter()
                    .map(|(node, entry)| {
                        (
                            self.vertex_at(node as usize).clone(),
                            Reached {
                                distance: entry.distance,
                                predecessor: entry
                                    .predecessor
                                    .map(|p| self.vertex_at(p as usize).clone()),
                            },
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(ShortestPaths {
            source: source.clone(),
            max_distance,
            reached,
        })
    }

    /// Cheapest path from `source` to `target`, `None` if unreachable.
    pub fn shortest_path(&self, source: &V, target: &V) -> GraphResult<Option<Path<V>>> {
        let s = self.node_id(source)?;
        let t = self.node_id(target)?;

        Ok(dijkstra(self.view(), s, t).map(|result| Path {
            source: source.clone(),
            target: target.clone(),
            vertices: result
                .path
                .iter()
                .map(|&node| self.vertex_at(node as usize).clone())
                .collect(),
            cost: result.cost,
        }))
    }
}
