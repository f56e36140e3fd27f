//! Strongly connected components
//!
//! Iterative Tarjan over the CSR view, so deep chains in large message
//! graphs cannot overflow the call stack.

use super::common::{GraphView, NodeId};
use std::collections::HashMap;

const UNVISITED: usize = usize::MAX;

/// Result of the SCC algorithm
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SccResult {
    /// Component ID -> member NodeIds. IDs are dense, `0..components.len()`,
    /// assigned in the order Tarjan emits them (reverse topological order of
    /// the condensation).
    pub components: Vec<Vec<NodeId>>,
    /// Map of NodeId -> Component ID
    pub node_component: HashMap<NodeId, usize>,
}

impl SccResult {
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Component ID of a node, if the node took part in the analysis
    pub fn component_of(&self, node: NodeId) -> Option<usize> {
        self.node_component.get(&node).copied()
    }

    /// True when both nodes are mutually reachable
    pub fn same_component(&self, a: NodeId, b: NodeId) -> bool {
        match (self.component_of(a), self.component_of(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Size of the largest component (0 for an empty graph)
    pub fn largest_component_size(&self) -> usize {
        self.components.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Strongly Connected Components (SCC)
///
/// Every node belongs to exactly one component; an edgeless graph yields one
/// singleton component per node.
pub fn strongly_connected_components(view: &GraphView) -> SccResult {
    strongly_connected_components_where(view, |_| true)
}

/// SCCs of the subgraph induced by the nodes for which `include` holds.
///
/// Excluded nodes get no component and edges touching them are ignored.
pub fn strongly_connected_components_where<F>(view: &GraphView, include: F) -> SccResult
where
    F: Fn(usize) -> bool,
{
    let n = view.node_count;
    let mut index = vec![UNVISITED; n];
    let mut low_link = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    // (node, position of the next successor to explore)
    let mut call_stack: Vec<(usize, usize)> = Vec::new();
    let mut next_index = 0usize;

    let mut components: Vec<Vec<NodeId>> = Vec::new();
    let mut node_component = HashMap::new();

    for root in 0..n {
        if !include(root) || index[root] != UNVISITED {
            continue;
        }

        index[root] = next_index;
        low_link[root] = next_index;
        next_index += 1;
        stack.push(root);
        on_stack[root] = true;
        call_stack.push((root, 0));

        while let Some(frame) = call_stack.last_mut() {
            let v = frame.0;
            let successors = view.successors(v);

            if frame.1 < successors.len() {
                let w = successors[frame.1];
                frame.1 += 1;

                if !include(w) {
                    continue;
                }
                if index[w] == UNVISITED {
                    index[w] = next_index;
                    low_link[w] = next_index;
                    next_index += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    call_stack.push((w, 0));
                } else if on_stack[w] {
                    low_link[v] = low_link[v].min(index[w]);
                }
                continue;
            }

            call_stack.pop();
            if let Some(&(parent, _)) = call_stack.last() {
                low_link[parent] = low_link[parent].min(low_link[v]);
            }

            if low_link[v] == index[v] {
                let component_id = components.len();
                let mut members = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    let node_id = view.index_to_node[w];
                    node_component.insert(node_id, component_id);
                    members.push(node_id);
                    if w == v {
                        break;
                    }
                }
                components.push(members);
            }
        }
    }

    SccResult {
        components,
        node_component,
    }
}
