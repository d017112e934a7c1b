// src/graph/order.rs
//! Breadth-first visit order from a root category.
//!
//! The order doubles as the scoring priority: broad categories near the root
//! are dispatched before the long tail.

use std::collections::VecDeque;

use super::store::{CategoryGraph, NodeId};

/// Returns every category reachable from `root` along child edges, each once,
/// in breadth-first order. `root` comes first.
#[must_use]
pub fn bfs_order(graph: &CategoryGraph, root: NodeId) -> Vec<NodeId> {
    let mut seen = vec![false; graph.len()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    seen[root.index()] = true;
    queue.push_back(root);

    while let Some(next) = queue.pop_front() {
        order.push(next);
        for &child in graph.children(next) {
            if !seen[child.index()] {
                seen[child.index()] = true;
                queue.push_back(child);
            }
        }
    }

    order
}
