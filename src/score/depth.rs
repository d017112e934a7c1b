// src/score/depth.rs
//! Depth scoring: distance from each target down the hierarchy.
//!
//! One breadth-first pass per target follows child links only, so a node is
//! connected to a target when it sits somewhere beneath it. Passes share
//! nothing and run in parallel.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::graph::{CategoryGraph, NodeId};

use super::targets::ResolvedTargets;
use super::{ScoreVector, Scorer};

const NO_CONNECTION: u32 = u32::MAX;

/// Per-target distance tables, one column per target in target order.
pub struct DepthAnnotation {
    columns: Vec<Vec<u32>>,
    workers: usize,
}

impl DepthAnnotation {
    /// Runs one pass per bound target on the current rayon pool. Unbound
    /// targets get an empty column.
    #[must_use]
    pub fn build(graph: &CategoryGraph, targets: &ResolvedTargets) -> Self {
        let workers = rayon::current_num_threads();
        let bound: Vec<Option<NodeId>> = targets.iter().map(|(_, id)| id).collect();
        let columns = bound
            .par_iter()
            .map(|id| match id {
                Some(root) => descend(graph, *root),
                None => vec![NO_CONNECTION; graph.len()],
            })
            .collect();
        Self { columns, workers }
    }

    /// Width of the pool the passes ran on.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Distance from target column `target` down to `node`, if connected.
    #[must_use]
    pub fn depth(&self, target: usize, node: NodeId) -> Option<u32> {
        self.columns
            .get(target)
            .and_then(|col| col.get(node.index()))
            .copied()
            .filter(|&d| d != NO_CONNECTION)
    }
}

// The distance table doubles as the visited marker; it is fresh for every pass.
fn descend(graph: &CategoryGraph, root: NodeId) -> Vec<u32> {
    let mut depth = vec![NO_CONNECTION; graph.len()];
    let mut queue = VecDeque::new();

    depth[root.index()] = 0;
    queue.push_back(root);

    while let Some(next) = queue.pop_front() {
        let d = depth[next.index()];
        for &child in graph.children(next) {
            if depth[child.index()] == NO_CONNECTION {
                depth[child.index()] = d + 1;
                queue.push_back(child);
            }
        }
    }

    depth
}

/// Turns recorded distances into scores.
///
/// Unconnected targets borrow the largest recorded distance, so they tie with
/// the worst connected target. Returns `None` when nothing was recorded.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn depth_scores(names: &[&str], depths: &[Option<u32>]) -> Option<ScoreVector> {
    let max_depth = depths.iter().flatten().copied().max()?;
    let total: u64 = depths
        .iter()
        .map(|d| u64::from(d.unwrap_or(max_depth)))
        .sum();

    let vector = names
        .iter()
        .zip(depths)
        .map(|(name, d)| {
            let score = if total == 0 {
                // Every recorded distance is zero: only the node's own target.
                if d.is_some() { 1.0 } else { 0.0 }
            } else {
                1.0 - f64::from(d.unwrap_or(max_depth)) / total as f64
            };
            ((*name).to_string(), score)
        })
        .collect();

    Some(vector)
}

/// The alternate scoring strategy.
pub struct DepthScorer<'g> {
    targets: &'g ResolvedTargets,
    annotation: DepthAnnotation,
}

impl<'g> DepthScorer<'g> {
    #[must_use]
    pub fn new(graph: &'g CategoryGraph, targets: &'g ResolvedTargets) -> Self {
        let annotation = DepthAnnotation::build(graph, targets);
        tracing::info!(
            targets = targets.len(),
            workers = annotation.workers(),
            "depth annotation complete"
        );
        Self {
            targets,
            annotation,
        }
    }
}

impl Scorer for DepthScorer<'_> {
    fn score(&self, start: NodeId) -> Option<ScoreVector> {
        let names: Vec<&str> = self.targets.iter().map(|(name, _)| name).collect();
        let depths: Vec<Option<u32>> = (0..names.len())
            .map(|t| self.annotation.depth(t, start))
            .collect();
        depth_scores(&names, &depths)
    }
}
