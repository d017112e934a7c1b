// src/score/targets.rs
//! The fixed set of top categories every score vector is expressed against.

use crate::graph::{CategoryGraph, NodeId};

use super::ScoreVector;

/// Top-level categories of the original Wikipedia study.
pub const DEFAULT_TARGETS: &[&str] = &[
    "Mathematics",
    "Language",
    "Chronology",
    "Belief",
    "Environment",
    "Education",
    "Law",
    "Geography",
    "History",
    "Health",
    "People",
    "Nature",
    "Science",
    "Technology",
    "Sports",
    "Business",
    "Arts",
    "Life",
    "Politics",
];

/// Ordered, duplicate-free target names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet {
    names: Vec<String>,
}

impl TargetSet {
    /// Keeps the first occurrence of each name; blank names are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if !name.is_empty() && !kept.contains(&name) {
                kept.push(name);
            }
        }
        Self { names: kept }
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Binds each name to its node. Targets missing from the graph stay unbound
    /// and will always score as unreached.
    #[must_use]
    pub fn resolve(&self, graph: &CategoryGraph) -> ResolvedTargets {
        let entries = self
            .names
            .iter()
            .map(|name| {
                let id = graph.lookup(name);
                if id.is_none() {
                    tracing::warn!(target_category = %name, "target category not present in graph");
                }
                (name.clone(), id)
            })
            .collect();
        ResolvedTargets { entries }
    }
}

impl Default for TargetSet {
    fn default() -> Self {
        Self::new(DEFAULT_TARGETS.iter().copied())
    }
}

/// Target names paired with their graph handles.
#[derive(Debug, Clone)]
pub struct ResolvedTargets {
    entries: Vec<(String, Option<NodeId>)>,
}

impl ResolvedTargets {
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<NodeId>)> {
        self.entries.iter().map(|(name, id)| (name.as_str(), *id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a vector over every target, scoring unbound targets as 0.
    pub fn vector_with<F>(&self, mut score: F) -> ScoreVector
    where
        F: FnMut(NodeId) -> f64,
    {
        self.entries
            .iter()
            .map(|(name, id)| (name.clone(), id.map_or(0.0, &mut score)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first() {
        let t = TargetSet::new(["Law", "Arts", "Law", " ", "Science"]);
        assert_eq!(t.names(), &["Law", "Arts", "Science"]);
    }

    #[test]
    fn test_default_has_nineteen() {
        assert_eq!(TargetSet::default().len(), 19);
    }

    #[test]
    fn test_unbound_target_scores_zero() {
        let mut g = CategoryGraph::new();
        g.add_edge("Law", "Contracts");
        let resolved = TargetSet::new(["Law", "Arts"]).resolve(&g);
        let v = resolved.vector_with(|_| 0.5);
        assert_eq!(v["Law"], 0.5);
        assert_eq!(v["Arts"], 0.0);
    }
}
