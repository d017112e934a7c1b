// src/config/io.rs
//! Reading `supercat.toml`.

use std::fs;
use std::path::Path;

use crate::error::{Result, SupercatError};

use super::types::Config;

pub const DEFAULT_CONFIG_FILE: &str = "supercat.toml";

/// Parses a TOML document. Missing sections and keys take their defaults.
///
/// # Errors
/// Returns error if the document is not valid TOML for [`Config`].
pub fn parse_toml(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

/// Loads the config at `path`, which must exist.
///
/// # Errors
/// Returns `MissingInput` if the file is absent, `Io` or `Toml` if it cannot be used.
pub fn load_toml_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(SupercatError::MissingInput(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|e| SupercatError::io(e, path))?;
    let config = parse_toml(&content)?;
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Loads `explicit` if given, else `supercat.toml` in `dir` when present, else defaults.
///
/// # Errors
/// Returns error if the chosen file cannot be read or parsed.
pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        return load_toml_config(path);
    }
    let local = dir.join(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return load_toml_config(&local);
    }
    Ok(Config::default())
}
