//! Eulerian circuit test for directed graphs
//!
//! A directed graph has an Eulerian circuit iff every node with nonzero
//! degree lies in one strongly connected component and every node has
//! in-degree equal to out-degree.

use super::common::{GraphView, NodeId, Weight};
use super::components::strongly_connected_components_where;

/// How a node's degree is counted for the balance condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BalanceMetric {
    /// Sum of edge weights: each message is an edge to traverse.
    #[default]
    Weighted,
    /// Number of distinct neighbours: multi-edges count once.
    Distinct,
}

/// A node whose in- and out-degree differ
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Imbalance {
    pub node: NodeId,
    pub in_degree: Weight,
    pub out_degree: Weight,
}

/// A failed Eulerian condition
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "condition", rename_all = "snake_case"))]
pub enum EulerianViolation {
    /// Nonzero-degree nodes are spread over more than one SCC
    Disconnected { components: usize },
    /// This many nodes have in-degree != out-degree
    Unbalanced { count: usize },
}

/// Result of the Eulerian circuit test
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EulerianResult {
    pub is_eulerian: bool,
    /// SCC count among nodes with nonzero degree
    pub component_count: usize,
    /// Unbalanced nodes in dense index order
    pub unbalanced: Vec<Imbalance>,
    pub violations: Vec<EulerianViolation>,
}

/// Check whether the graph has an Eulerian circuit.
///
/// Both conditions are always evaluated so the result explains every
/// failure. A graph without nodes or edges is vacuously Eulerian.
pub fn eulerian_circuit_check(view: &GraphView, metric: BalanceMetric) -> EulerianResult {
    let n = view.node_count;

    let degrees: Vec<(Weight, Weight)> = (0..n)
        .map(|idx| match metric {
            BalanceMetric::Weighted => (view.weighted_in_degree(idx), view.weighted_out_degree(idx)),
            BalanceMetric::Distinct => (view.in_degree(idx) as Weight, view.out_degree(idx) as Weight),
        })
        .collect();

    let unbalanced: Vec<Imbalance> = degrees
        .iter()
        .enumerate()
        .filter(|(_, (i, o))| i != o)
        .map(|(idx, &(in_degree, out_degree))| Imbalance {
            node: view.index_to_node[idx],
            in_degree,
            out_degree,
        })
        .collect();

    let active = |idx: usize| {
        let (i, o) = degrees[idx];
        i + o > 0
    };
    let component_count = strongly_connected_components_where(view, active).component_count();

    let mut violations = Vec::new();
    if component_count > 1 {
        violations.push(EulerianViolation::Disconnected {
            components: component_count,
        });
    }
    if !unbalanced.is_empty() {
        violations.push(EulerianViolation::Unbalanced {
            count: unbalanced.len(),
        });
    }

    EulerianResult {
        is_eulerian: violations.is_empty(),
        component_count,
        unbalanced,
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tests::view_from_edges;

    #[test]
    fn test_directed_cycle_is_eulerian() {
        let view = view_from_edges(5, &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 4, 1), (4, 0, 1)]);
        let result = eulerian_circuit_check(&view, BalanceMetric::Weighted);

        assert!(result.is_eulerian);
        assert_eq!(result.component_count, 1);
        assert!(result.unbalanced.is_empty());
        assert!(result.violations.is_empty());
    }

    #[test]
    fn test_unbalanced_node_is_flagged() {
        // Cycle 0 -> 1 -> 2 -> 0 plus an extra 0 -> 1 message
        let view = view_from_edges(3, &[(0, 1, 2), (1, 2, 1), (2, 0, 1)]);
        let result = eulerian_circuit_check(&view, BalanceMetric::Weighted);

        assert!(!result.is_eulerian);
        assert_eq!(
            result.unbalanced,
            vec![
                Imbalance { node: 0, in_degree: 1, out_degree: 2 },
                Imbalance { node: 1, in_degree: 2, out_degree: 1 },
            ]
        );
        assert_eq!(result.violations, vec![EulerianViolation::Unbalanced { count: 2 }]);
    }

    #[test]
    fn test_distinct_metric_ignores_multiplicity() {
        let view = view_from_edges(3, &[(0, 1, 2), (1, 2, 1), (2, 0, 1)]);
        let result = eulerian_circuit_check(&view, BalanceMetric::Distinct);
        assert!(result.is_eulerian);
    }

    #[test]
    fn test_two_cycles_are_disconnected() {
        // 0 <-> 1 and 2 <-> 3: balanced but two components
        let view = view_from_edges(4, &[(0, 1, 1), (1, 0, 1), (2, 3, 1), (3, 2, 1)]);
        let result = eulerian_circuit_check(&view, BalanceMetric::Weighted);

        assert!(!result.is_eulerian);
        assert_eq!(result.component_count, 2);
        assert_eq!(result.violations, vec![EulerianViolation::Disconnected { components: 2 }]);
    }

    #[test]
    fn test_zero_degree_nodes_do_not_break_connectivity() {
        // Node 2 has no edges at all
        let view = view_from_edges(3, &[(0, 1, 1), (1, 0, 1)]);
        let result = eulerian_circuit_check(&view, BalanceMetric::Weighted);
        assert!(result.is_eulerian);
        assert_eq!(result.component_count, 1);
    }

    #[test]
    fn test_empty_graph_is_vacuously_eulerian() {
        let view = view_from_edges(0, &[]);
        let result = eulerian_circuit_check(&view, BalanceMetric::Weighted);
        assert!(result.is_eulerian);
        assert_eq!(result.component_count, 0);
    }

    #[test]
    fn test_both_conditions_reported() {
        // 0 -> 1 only: two singleton SCCs and both nodes unbalanced
        let view = view_from_edges(2, &[(0, 1, 1)]);
        let result = eulerian_circuit_check(&view, BalanceMetric::Weighted);
        assert_eq!(
            result.violations,
            vec![
                EulerianViolation::Disconnected { components: 2 },
                EulerianViolation::Unbalanced { count: 2 },
            ]
        );
    }
}
