//! Strongly connected components and the Eulerian circuit test

use crate::graph::{Graph, Vertex, Weight};
use mailgraph_algorithms::{
    eulerian_circuit_check, strongly_connected_components, BalanceMetric, EulerianViolation,
};
use serde::Serialize;
use std::collections::HashMap;

/// SCC partition of a graph, expressed in vertex tokens
#[derive(Debug, Clone, Serialize)]
pub struct Components<V> {
    /// Components ordered by size descending, then by smallest member.
    /// Members are sorted ascending. A component's id is its position here.
    pub components: Vec<Vec<V>>,
    #[serde(skip)]
    membership: HashMap<V, usize>,
}

impl<V: Vertex> Components<V> {
    pub fn count(&self) -> usize {
        self.components.len()
    }

    pub fn component_of(&self, vertex: &V) -> Option<usize> {
        self.membership.get(vertex).copied()
    }

    /// True iff each vertex is reachable from the other
    pub fn same_component(&self, a: &V, b: &V) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    pub fn largest(&self) -> Option<&[V]> {
        self.components.first().map(Vec::as_slice)
    }
}

/// A vertex failing the balance condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VertexImbalance<V> {
    pub vertex: V,
    pub in_degree: Weight,
    pub out_degree: Weight,
}

/// Outcome of the Eulerian circuit test
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EulerianReport<V> {
    pub is_eulerian: bool,
    /// Degree metric used for the balance condition
    pub metric: BalanceMetric,
    /// SCC count among vertices with nonzero degree
    pub component_count: usize,
    /// Unbalanced vertices, ascending
    pub unbalanced: Vec<VertexImbalance<V>>,
    pub violations: Vec<EulerianViolation>,
}

impl<V: Vertex> Graph<V> {
    /// Strongly connected components of the whole graph
    pub fn strongly_connected_components(&self) -> Components<V> {
        let result = strongly_connected_components(self.view());

        let mut components: Vec<Vec<V>> = result
            .components
            .iter()
            .map(|members| {
                let mut vertices: Vec<V> = members
                    .iter()
                    .map(|&node| self.vertex_at(node as usize).clone())
                    .collect();
                vertices.sort();
                vertices
            })
            .collect();
        components.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.first().cmp(&b.first())));

        let membership = components
            .iter()
            .enumerate()
            .flat_map(|(id, members)| members.iter().map(move |v| (v.clone(), id)))
            .collect();

        Components {
            components,
            membership,
        }
    }

    /// Eulerian circuit test using weighted (message count) degrees
    pub fn eulerian_check(&self) -> EulerianReport<V> {
        self.eulerian_check_with(BalanceMetric::Weighted)
    }

    /// Eulerian circuit test with an explicit balance metric
    pub fn eulerian_check_with(&self, metric: BalanceMetric) -> EulerianReport<V> {
        let result = eulerian_circuit_check(self.view(), metric);

        let mut unbalanced: Vec<VertexImbalance<V>> = result
            .unbalanced
            .iter()
            .map(|imbalance| VertexImbalance {
                vertex: self.vertex_at(imbalance.node as usize).clone(),
                in_degree: imbalance.in_degree,
                out_degree: imbalance.out_degree,
            })
            .collect();
        unbalanced.sort_by(|a, b| a.vertex.cmp(&b.vertex));

        EulerianReport {
            is_eulerian: result.is_eulerian,
            metric,
            component_count: result.component_count,
            unbalanced,
            violations: result.violations,
        }
    }
}
