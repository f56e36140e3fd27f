//! Graph diameter
//!
//! One Dijkstra run per source node; the diameter is the largest finite
//! shortest-path distance over all ordered pairs. Unreachable pairs are
//! skipped rather than treated as infinite.

use super::common::{GraphView, NodeId, Weight};
use super::pathfinding::{dijkstra_from, UNREACHED};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info};

/// Diameter configuration
#[derive(Debug, Clone, Copy)]
pub struct DiameterConfig<'a> {
    /// Spread the per-source searches over the rayon pool
    pub parallel: bool,
    /// When set, remaining sources are abandoned
    pub cancel: Option<&'a AtomicBool>,
    /// Log progress every N processed sources (0 disables)
    pub progress_interval: usize,
}

impl Default for DiameterConfig<'_> {
    fn default() -> Self {
        Self {
            parallel: true,
            cancel: None,
            progress_interval: 0,
        }
    }
}

/// Result of the diameter computation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DiameterResult {
    pub value: Weight,
    /// One shortest path realizing `value`
    pub path: Vec<NodeId>,
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
    /// False if the run was cancelled before every source was processed
    pub complete: bool,
}

impl DiameterResult {
    /// Number of nodes on the realizing path
    pub fn path_length(&self) -> usize {
        self.path.len()
    }
}

/// Farthest reachable target from one source
struct Candidate {
    value: Weight,
    source_idx: usize,
    path: Vec<usize>,
}

impl Candidate {
    /// Larger value wins; on ties the lower source index wins so the
    /// sequential and parallel reductions agree.
    fn better(self, other: Candidate) -> Candidate {
        if other.value > self.value
            || (other.value == self.value && other.source_idx < self.source_idx)
        {
            other
        } else {
            self
        }
    }
}

fn farthest_from(view: &GraphView, source_idx: usize) -> Option<Candidate> {
    // A node with no successors reaches nothing but itself.
    if view.out_degree(source_idx) == 0 {
        return None;
    }

    let table = dijkstra_from(view, source_idx, None, None);
    let mut best: Option<(Weight, usize)> = None;
    for &idx in &table.settled {
        let d = table.dist[idx];
        if idx == source_idx || d == UNREACHED || d == 0 {
            continue;
        }
        match best {
            Some((value, target)) if d < value || (d == value && idx > target) => {}
            _ => best = Some((d, idx)),
        }
    }

    best.map(|(value, target_idx)| Candidate {
        value,
        source_idx,
        path: table.index_path(target_idx),
    })
}

struct Progress<'a> {
    processed: AtomicUsize,
    total: usize,
    interval: usize,
    cancel: Option<&'a AtomicBool>,
}

impl Progress<'_> {
    fn cancelled(&self) -> bool {
        self.cancel.is_some_and(|c| c.load(Ordering::Relaxed))
    }

    fn tick(&self) {
        let done = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.interval > 0 && (done % self.interval == 0 || done == self.total) {
            info!("Diameter: processed {}/{} sources", done, self.total);
        }
    }
}

/// Compute the diameter of the graph.
///
/// An empty graph yields value 0 and an empty path. A graph where no node
/// reaches another yields value 0 and the single-node path of its first node.
pub fn diameter(view: &GraphView, config: &DiameterConfig<'_>) -> DiameterResult {
    let n = view.node_count;
    let progress = Progress {
        processed: AtomicUsize::new(0),
        total: n,
        interval: config.progress_interval,
        cancel: config.cancel,
    };

    let search = |idx: usize| -> Option<Candidate> {
        if progress.cancelled() {
            return None;
        }
        let candidate = farthest_from(view, idx);
        progress.tick();
        candidate
    };

    debug!("Computing diameter over {} nodes (parallel: {})", n, config.parallel);

    let best = if config.parallel {
        (0..n)
            .into_par_iter()
            .filter_map(search)
            .reduce_with(Candidate::better)
    } else {
        (0..n).filter_map(search).reduce(Candidate::better)
    };

    let complete = progress.processed.load(Ordering::Relaxed) == n;
    if !complete {
        info!(
            "Diameter cancelled after {}/{} sources",
            progress.processed.load(Ordering::Relaxed),
            n
        );
    }

    match best {
        Some(candidate) => {
            let path: Vec<NodeId> = candidate.path.iter().map(|&i| view.index_to_node[i]).collect();
            DiameterResult {
                value: candidate.value,
                source: path.first().copied(),
                target: path.last().copied(),
                path,
                complete,
            }
        }
        None => {
            let first = view.index_to_node.first().copied();
            DiameterResult {
                value: 0,
                path: first.into_iter().collect(),
                source: first,
                target: first,
                complete,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::view_from_edges;

    fn sequential() -> DiameterConfig<'static> {
        DiameterConfig {
            parallel: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_chain_diameter() {
        let view = view_from_edges(3, &[(0, 1, 2), (1, 2, 3)]);
        let result = diameter(&view, &sequential());

        assert_eq!(result.value, 5);
        assert_eq!(result.path, vec![0, 1, 2]);
        assert_eq!(result.source, Some(0));
        assert_eq!(result.target, Some(2));
        assert_eq!(result.path_length(), 3);
        assert!(result.complete);
    }

    #[test]
    fn test_diameter_uses_shortest_not_longest_path() {
        // 0->1 (10), 1->2 (5), 0->2 (50): shortest 0..2 is 15
        let view = view_from_edges(3, &[(0, 1, 10), (0, 2, 50), (1, 2, 5)]);
        let result = diameter(&view, &sequential());
        assert_eq!(result.value, 15);
        assert_eq!(result.path, vec![0, 1, 2]);
    }

    #[test]
    fn test_disconnected_pairs_are_ignored() {
        // 0 -> 1 (4) and 2 -> 3 (7), no path between the halves
        let view = view_from_edges(4, &[(0, 1, 4), (2, 3, 7)]);
        let result = diameter(&view, &sequential());
        assert_eq!(result.value, 7);
        assert_eq!(result.path, vec![2, 3]);
    }

    #[test]
    fn test_empty_graph() {
        let view = view_from_edges(0, &[]);
        let result = diameter(&view, &sequential());
        assert_eq!(result.value, 0);
        assert!(result.path.is_empty());
        assert_eq!(result.source, None);
        assert!(result.complete);
    }

    #[test]
    fn test_single_node() {
        let view = view_from_edges(1, &[]);
        let result = diameter(&view, &sequential());
        assert_eq!(result.value, 0);
        assert_eq!(result.path, vec![0]);
        assert_eq!(result.source, Some(0));
        assert_eq!(result.target, Some(0));
        assert_eq!(result.path_length(), 1);
    }

    #[test]
    fn test_parallel_matches_sequential_on_ties() {
        // Two disjoint chains of equal cost: lower source index must win
        let view = view_from_edges(6, &[(3, 4, 2), (4, 5, 2), (0, 1, 2), (1, 2, 2)]);
        let seq = diameter(&view, &sequential());
        let par = diameter(&view, &DiameterConfig::default());

        assert_eq!(seq, par);
        assert_eq!(seq.value, 4);
        assert_eq!(seq.path, vec![0, 1, 2]);
    }

    #[test]
    fn test_cancelled_run_is_incomplete() {
        let cancel = AtomicBool::new(true);
        let view = view_from_edges(3, &[(0, 1, 1), (1, 2, 1)]);
        let result = diameter(
            &view,
            &DiameterConfig {
                parallel: false,
                cancel: Some(&cancel),
                progress_interval: 1,
            },
        );
        assert!(!result.complete);
        assert_eq!(result.value, 0);
    }

    #[test]
    fn test_diameter_bounded_by_chain_length() {
        // Connected cycle: diameter <= (V - 1) * max weight
        let edges: Vec<_> = (0..10).map(|i| (i, (i + 1) % 10, (i as u64 % 3) + 1)).collect();
        let view = view_from_edges(10, &edges);
        let result = diameter(&view, &DiameterConfig::default());
        assert!(result.value <= 9 * 3);
        assert!(result.value > 0);
        assert!(result.complete);
    }
}
