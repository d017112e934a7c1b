// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::DEFAULT_CONFIG_FILE;
pub use self::types::{
    Config, DispatchConfig, GraphConfig, OutputConfig, TargetsConfig, WalkConfig,
};

use std::path::Path;

use crate::error::{Result, SupercatError};

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads from `explicit`, or from `supercat.toml` in the working directory.
    ///
    /// # Errors
    /// Returns error if a config file exists but cannot be read or parsed, or
    /// if an explicit path does not exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        io::discover(explicit, Path::new("."))
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    /// Returns error on invalid TOML.
    pub fn parse_toml(content: &str) -> Result<Self> {
        io::parse_toml(content)
    }

    /// Rejects constants the engine cannot run with.
    ///
    /// # Errors
    /// Returns `InvalidConfig` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        let walk = &self.walk;
        if !(0.0..=1.0).contains(&walk.alpha) {
            return invalid(format!("walk.alpha must be within [0, 1], got {}", walk.alpha));
        }
        if walk.iterations == 0 {
            return invalid("walk.iterations must be at least 1".into());
        }
        if !walk.tolerance.is_finite() || walk.tolerance < 0.0 {
            return invalid(format!(
                "walk.tolerance must be a non-negative number, got {}",
                walk.tolerance
            ));
        }
        if self.dispatch.max_threads == 0 {
            return invalid("dispatch.max_threads must be at least 1".into());
        }
        if self.targets.set().is_empty() {
            return invalid("targets.names must name at least one category".into());
        }
        Ok(())
    }
}

fn invalid(msg: String) -> Result<()> {
    Err(SupercatError::InvalidConfig(msg))
}
