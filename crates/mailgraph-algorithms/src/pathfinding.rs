//! Pathfinding algorithms
//!
//! Single-source Dijkstra over non-negative integer weights. Edge weight is
//! used as a literal path cost: a path's length is the sum of the stored
//! weights it traverses.

use super::common::{GraphView, NodeId, Weight};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

pub(crate) const UNREACHED: Weight = Weight::MAX;
pub(crate) const NO_PARENT: usize = usize::MAX;

/// Result of a point-to-point pathfinding query
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: Weight,
}

/// Distance and predecessor of a reached node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PathEntry {
    pub distance: Weight,
    /// `None` only for the source itself
    pub predecessor: Option<NodeId>,
}

/// Shortest-path tree rooted at `source`.
///
/// Holds only the nodes whose distance is within `max_distance`; unreachable
/// and out-of-range nodes are absent rather than infinite.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ShortestPathTree {
    pub source: NodeId,
    pub max_distance: Option<Weight>,
    pub entries: HashMap<NodeId, PathEntry>,
}

impl ShortestPathTree {
    pub fn distance(&self, node: NodeId) -> Option<Weight> {
        self.entries.get(&node).map(|e| e.distance)
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Walk predecessor pointers back to the source
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        let mut entry = self.entries.get(&target)?;
        let mut path = vec![target];
        while let Some(prev) = entry.predecessor {
            path.push(prev);
            entry = self.entries.get(&prev)?;
        }
        path.reverse();
        Some(path)
    }

    /// Reached nodes sorted by (distance, NodeId)
    pub fn by_distance(&self) -> Vec<(NodeId, Weight)> {
        let mut reached: Vec<(NodeId, Weight)> =
            self.entries.iter().map(|(&n, e)| (n, e.distance)).collect();
        reached.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        reached
    }
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq, Eq)]
struct State {
    cost: Weight,
    node_idx: usize,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap; equal costs pop lowest index first
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node_idx.cmp(&self.node_idx))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dense per-index distance table produced by one Dijkstra run
pub(crate) struct DistanceTable {
    pub(crate) dist: Vec<Weight>,
    pub(crate) parent: Vec<usize>,
    /// Indices in the order they were settled
    pub(crate) settled: Vec<usize>,
}

impl DistanceTable {
    /// Dense index path from the run's source to `target`
    pub(crate) fn index_path(&self, target: usize) -> Vec<usize> {
        let mut path = vec![target];
        let mut curr = self.parent[target];
        while curr != NO_PARENT {
            path.push(curr);
            curr = self.parent[curr];
        }
        path.reverse();
        path
    }
}

/// Core Dijkstra loop over dense indices.
///
/// A predecessor is only replaced by a strictly shorter path, so the first
/// shortest path discovered wins. Stops early once `stop_at` is settled.
pub(crate) fn dijkstra_from(
    view: &GraphView,
    source_idx: usize,
    max_distance: Option<Weight>,
    stop_at: Option<usize>,
) -> DistanceTable {
    let bound = max_distance.unwrap_or(UNREACHED - 1);
    let mut dist = vec![UNREACHED; view.node_count];
    let mut parent = vec![NO_PARENT; view.node_count];
    let mut done = vec![false; view.node_count];
    let mut settled = Vec::new();
    let mut heap = BinaryHeap::new();

    dist[source_idx] = 0;
    heap.push(State { cost: 0, node_idx: source_idx });

    while let Some(State { cost, node_idx }) = heap.pop() {
        if done[node_idx] || cost > dist[node_idx] {
            continue;
        }
        done[node_idx] = true;
        settled.push(node_idx);

        if Some(node_idx) == stop_at {
            break;
        }

        for (&next_idx, &weight) in view.successors(node_idx).iter().zip(view.weights(node_idx)) {
            let next_cost = cost.saturating_add(weight);
            if next_cost > bound {
                continue;
            }
            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                parent[next_idx] = node_idx;
                heap.push(State { cost: next_cost, node_idx: next_idx });
            }
        }
    }

    DistanceTable { dist, parent, settled }
}

/// Single-source shortest paths, optionally bounded.
///
/// Returns `None` if `source` is not in the view.
pub fn single_source_shortest_paths(
    view: &GraphView,
    source: NodeId,
    max_distance: Option<Weight>,
) -> Option<ShortestPathTree> {
    let source_idx = *view.node_to_index.get(&source)?;
    let table = dijkstra_from(view, source_idx, max_distance, None);

    let entries = table
        .settled
        .iter()
        .map(|&idx| {
            let predecessor = match table.parent[idx] {
                NO_PARENT => None,
                p => Some(view.index_to_node[p]),
            };
            (
                view.index_to_node[idx],
                PathEntry {
                    distance: table.dist[idx],
                    predecessor,
                },
            )
        })
        .collect();

    Some(ShortestPathTree {
        source,
        max_distance,
        entries,
    })
}

/// Dijkstra's Algorithm (Weighted Shortest Path) between two nodes
///
/// Returns `None` if either node is unknown or `target` is unreachable.
pub fn dijkstra(
    view: &GraphView,
    source: NodeId,
    target: NodeId,
) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;

    let table = dijkstra_from(view, source_idx, None, Some(target_idx));
    if table.dist[target_idx] == UNREACHED {
        return None;
    }

    let path = table
        .index_path(target_idx)
        .into_iter()
        .map(|idx| view.index_to_node[idx])
        .collect();

    Some(PathResult {
        source,
        target,
        path,
        cost: table.dist[target_idx],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::view_from_edges;

    #[test]
    fn test_chain_distances() {
        // A(0) -> B(1) weight 2, B -> C(2) weight 3
        let view = view_from_edges(3, &[(0, 1, 2), (1, 2, 3)]);

        let tree = single_source_shortest_paths(&view, 0, None).unwrap();
        assert_eq!(tree.distance(0), Some(0));
        assert_eq!(tree.distance(1), Some(2));
        assert_eq!(tree.distance(2), Some(5));
        assert_eq!(tree.path_to(2), Some(vec![0, 1, 2]));
        assert_eq!(tree.entries[&0].predecessor, None);
    }

    #[test]
    fn test_bounded_search_excludes_far_nodes() {
        let view = view_from_edges(3, &[(0, 1, 2), (1, 2, 3)]);

        let tree = single_source_shortest_paths(&view, 0, Some(2)).unwrap();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.distance(1), Some(2));
        assert!(!tree.contains(2));
        assert_eq!(tree.by_distance(), vec![(0, 0), (1, 2)]);
    }

    #[test]
    fn test_unreachable_nodes_are_absent() {
        // 2 -> 0 only; nothing leaves 0 towards 2
        let view = view_from_edges(3, &[(2, 0, 1), (0, 1, 1)]);
        let tree = single_source_shortest_paths(&view, 0, None).unwrap();
        assert!(!tree.contains(2));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_unknown_source() {
        let view = view_from_edges(2, &[(0, 1, 1)]);
        assert!(single_source_shortest_paths(&view, 42, None).is_none());
        assert!(dijkstra(&view, 42, 0).is_none());
    }

    #[test]
    fn test_dijkstra() {
        // 0->1 (10), 1->2 (5), 0->2 (50)
        let view = view_from_edges(3, &[(0, 1, 10), (0, 2, 50), (1, 2, 5)]);

        let result = dijkstra(&view, 0, 2).unwrap();
        assert_eq!(result.path, vec![0, 1, 2]);
        assert_eq!(result.cost, 15);
    }

    #[test]
    fn test_dijkstra_unreachable_target() {
        let view = view_from_edges(2, &[(1, 0, 1)]);
        assert!(dijkstra(&view, 0, 1).is_none());
    }

    #[test]
    fn test_equal_paths_keep_first_discovered() {
        // 0 -> 1 -> 3 and 0 -> 2 -> 3, both cost 2
        let view = view_from_edges(4, &[(0, 1, 1), (0, 2, 1), (1, 3, 1), (2, 3, 1)]);
        let tree = single_source_shortest_paths(&view, 0, None).unwrap();
        assert_eq!(tree.distance(3), Some(2));
        assert_eq!(tree.path_to(3), Some(vec![0, 1, 3]));
    }

    #[test]
    fn test_self_loop_does_not_change_distance() {
        let view = view_from_edges(2, &[(0, 0, 7), (0, 1, 1)]);
        let tree = single_source_shortest_paths(&view, 0, None).unwrap();
        assert_eq!(tree.distance(0), Some(0));
        assert_eq!(tree.distance(1), Some(1));
    }
}
