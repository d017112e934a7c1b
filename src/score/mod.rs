// src/score/mod.rs
//! Scoring strategies: how strongly a category leans toward each target.

pub mod depth;
pub mod rwr;
pub mod targets;

use std::collections::BTreeMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::graph::{CategoryGraph, NodeId};

pub use depth::{DepthAnnotation, DepthScorer};
pub use rwr::{diffuse, Distribution, RandomWalk, WalkParams};
pub use targets::{ResolvedTargets, TargetSet, DEFAULT_TARGETS};

/// Target name to score, in alphabetical target order.
pub type ScoreVector = BTreeMap<String, f64>;

/// A strategy computing one category's vector against a fixed target set.
pub trait Scorer: Send + Sync {
    /// Returns `None` when the strategy has nothing to say about `start`.
    fn score(&self, start: NodeId) -> Option<ScoreVector>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    /// Random walk with restart.
    #[default]
    Rwr,
    /// Inverse depth below each target.
    Depth,
}

/// Prepares the strategy for `mode`. Depth mode annotates the whole graph here.
#[must_use]
pub fn build_scorer<'g>(
    mode: ScoringMode,
    graph: &'g CategoryGraph,
    targets: &'g ResolvedTargets,
    params: WalkParams,
) -> Box<dyn Scorer + 'g> {
    match mode {
        ScoringMode::Rwr => Box::new(RandomWalk::new(graph, targets, params)),
        ScoringMode::Depth => Box::new(DepthScorer::new(graph, targets)),
    }
}
