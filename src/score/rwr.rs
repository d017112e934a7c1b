// src/score/rwr.rs
//! Random Walk with Restart over the undirected category graph.
//!
//! Mass diffuses along parent and child links alike: a node holding `p` with
//! `d` neighbors sends `p / d` to each. After every step a fraction `alpha` is
//! pulled back to the start node. Only nodes within `j` hops of the start can
//! hold mass after `j` steps, so each step scans the growing frontier instead
//! of the whole graph.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::graph::{CategoryGraph, NodeId};

use super::targets::ResolvedTargets;
use super::{ScoreVector, Scorer};

/// Walk constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkParams {
    /// Probability of returning to the start node at each step.
    pub alpha: f64,
    /// Number of diffusion steps.
    pub iterations: usize,
    /// Allowed drift of total mass from 1.0 before renormalizing.
    pub tolerance: f64,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            alpha: 0.01,
            iterations: 10,
            tolerance: 0.001,
        }
    }
}

/// Final mass per node after a walk. Nodes never reached are absent.
#[derive(Debug, Clone, Default)]
pub struct Distribution {
    mass: HashMap<NodeId, f64>,
}

impl Distribution {
    #[must_use]
    pub fn get(&self, id: NodeId) -> f64 {
        self.mass.get(&id).copied().unwrap_or(0.0)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.mass.values().sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.mass.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }
}

/// Nodes discovered so far, in discovery order.
struct Frontier {
    reached: Vec<NodeId>,
    seen: HashSet<NodeId>,
    boundary: usize,
}

impl Frontier {
    fn new(start: NodeId) -> Self {
        Self {
            reached: vec![start],
            seen: HashSet::from([start]),
            boundary: 0,
        }
    }

    /// Adds the neighbors of everything discovered by the previous expansion.
    fn expand(&mut self, graph: &CategoryGraph) {
        let end = self.reached.len();
        for i in self.boundary..end {
            let node = self.reached[i];
            for next in graph.neighbors(node) {
                if self.seen.insert(next) {
                    self.reached.push(next);
                }
            }
        }
        self.boundary = end;
    }
}

/// Runs the walk from `start` and returns the mass held by every reached node.
///
/// Summation follows frontier and adjacency order, so repeated runs are bit-identical.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn diffuse(graph: &CategoryGraph, start: NodeId, params: WalkParams) -> Distribution {
    let mut last: HashMap<NodeId, f64> = HashMap::from([(start, 1.0)]);
    let mut current: HashMap<NodeId, f64> = HashMap::new();
    let mut frontier = Frontier::new(start);

    for _ in 0..params.iterations {
        frontier.expand(graph);

        for &node in &frontier.reached {
            let inbound: f64 = graph
                .neighbors(node)
                .filter_map(|m| last.get(&m).map(|p| p / graph.degree(m) as f64))
                .sum();

            let mut mass = inbound * (1.0 - params.alpha);
            if node == start {
                mass += params.alpha;
            } else if mass == 0.0 {
                continue;
            }
            current.insert(node, mass);
        }

        renormalize(&mut current, &frontier.reached, params.tolerance);

        std::mem::swap(&mut last, &mut current);
        current.clear();
    }

    Distribution { mass: last }
}

// Rescales to 1.0 once the total has drifted past `tolerance`. An isolated start
// node drifts this way, since only the restart term reaches it.
fn renormalize(mass: &mut HashMap<NodeId, f64>, order: &[NodeId], tolerance: f64) {
    let sum: f64 = order.iter().filter_map(|n| mass.get(n)).sum();
    if sum <= 0.0 || (sum - 1.0).abs() <= tolerance {
        return;
    }
    let factor = 1.0 / sum;
    for value in mass.values_mut() {
        *value *= factor;
    }
}

/// The primary scoring strategy.
pub struct RandomWalk<'g> {
    graph: &'g CategoryGraph,
    targets: &'g ResolvedTargets,
    params: WalkParams,
}

impl<'g> RandomWalk<'g> {
    #[must_use]
    pub fn new(graph: &'g CategoryGraph, targets: &'g ResolvedTargets, params: WalkParams) -> Self {
        Self {
            graph,
            targets,
            params,
        }
    }
}

impl Scorer for RandomWalk<'_> {
    fn score(&self, start: NodeId) -> Option<ScoreVector> {
        let dist = diffuse(self.graph, start, self.params);
        Some(self.targets.vector_with(|id| dist.get(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> CategoryGraph {
        let mut g = CategoryGraph::new();
        g.add_edge("B", "A");
        g.add_edge("C", "B");
        g
    }

    #[test]
    fn test_zero_iterations_keeps_start() {
        let g = chain();
        let a = g.lookup("A").unwrap();
        let params = WalkParams {
            iterations: 0,
            ..WalkParams::default()
        };
        let dist = diffuse(&g, a, params);
        assert_eq!(dist.get(a), 1.0);
        assert_eq!(dist.len(), 1);
    }

    #[test]
    fn test_one_step_on_chain() {
        // A has one neighbor (B): after one step B holds 0.99, A holds the restart 0.01.
        let g = chain();
        let a = g.lookup("A").unwrap();
        let b = g.lookup("B").unwrap();
        let params = WalkParams {
            iterations: 1,
            ..WalkParams::default()
        };
        let dist = diffuse(&g, a, params);
        assert!((dist.get(b) - 0.99).abs() < 1e-12);
        assert!((dist.get(a) - 0.01).abs() < 1e-12);
        assert_eq!(dist.get(g.lookup("C").unwrap()), 0.0);
    }

    #[test]
    fn test_isolated_start_renormalizes() {
        let mut g = CategoryGraph::new();
        let lone = g.get_or_create("Lone");
        let dist = diffuse(&g, lone, WalkParams::default());
        assert!((dist.get(lone) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_frontier_grows_one_hop_per_step() {
        let g = chain();
        let a = g.lookup("A").unwrap();
        let mut f = Frontier::new(a);
        f.expand(&g);
        assert_eq!(f.reached.len(), 2);
        f.expand(&g);
        assert_eq!(f.reached.len(), 3);
        f.expand(&g);
        assert_eq!(f.reached.len(), 3);
    }
}
