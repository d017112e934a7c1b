// src/config/types.rs
use serde::{Deserialize, Serialize};

use crate::score::{ScoringMode, TargetSet, WalkParams, DEFAULT_TARGETS};
use crate::sink::OutputFormat;

/// Everything a run can be tuned with. Mirrors `supercat.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub mode: ScoringMode,
    #[serde(default)]
    pub walk: WalkConfig,
    #[serde(default)]
    pub dispatch: DispatchConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub targets: TargetsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkConfig {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            iterations: default_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

impl WalkConfig {
    #[must_use]
    pub fn params(&self) -> WalkParams {
        WalkParams {
            alpha: self.alpha,
            iterations: self.iterations,
            tolerance: self.tolerance,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default = "default_max_threads")]
    pub max_threads: usize,
    /// Log progress after this many completed tasks. Zero disables.
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_threads: default_max_threads(),
            progress_every: default_progress_every(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Collapse repeated edge records into one link.
    #[serde(default)]
    pub dedup_edges: bool,
    /// Where `order` starts its breadth-first walk.
    #[serde(default = "default_root")]
    pub root: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            dedup_edges: false,
            root: default_root(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetsConfig {
    #[serde(default = "default_target_names")]
    pub names: Vec<String>,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            names: default_target_names(),
        }
    }
}

impl TargetsConfig {
    #[must_use]
    pub fn set(&self) -> TargetSet {
        TargetSet::new(self.names.iter().cloned())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Fixed number of decimals. Unset prints the shortest exact form.
    #[serde(default)]
    pub precision: Option<usize>,
}

const fn default_alpha() -> f64 { 0.01 }
const fn default_iterations() -> usize { 10 }
const fn default_tolerance() -> f64 { 0.001 }
const fn default_max_threads() -> usize { 8 }
const fn default_progress_every() -> usize { 10_000 }

fn default_root() -> String {
    "Main_topic_classifications".to_string()
}

fn default_target_names() -> Vec<String> {
    DEFAULT_TARGETS.iter().map(|s| (*s).to_string()).collect()
}
