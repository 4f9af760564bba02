//! Configuration and keyword-dictionary loading from the file system.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use super::types::{Config, Keyword};
use crate::color::Color;
use crate::error::ScriptpadError;

/// Load the configuration file. The path may start with `~`.
///
/// Any failure here is fatal: the application cannot proceed without a
/// valid configuration (there is no meaningful default palette or command).
#[instrument(name = "load_config")]
pub fn load_config(path: &str) -> Result<Config, ScriptpadError> {
    let expanded = shellexpand::tilde(path).into_owned();
    let raw = fs::read_to_string(&expanded).map_err(|e| ScriptpadError::ConfigLoad {
        path: expanded.clone(),
        reason: e.to_string(),
    })?;
    let config: Config = serde_json::from_str(&raw).map_err(|e| ScriptpadError::ConfigLoad {
        path: expanded.clone(),
        reason: e.to_string(),
    })?;
    info!(path = %expanded, "configuration loaded");
    Ok(config)
}

/// Load the keyword dictionary: a JSON array of `{word, color}` objects,
/// collected into a word-keyed map. The previous dictionary (if any) is
/// replaced wholesale by the caller; entries are immutable after load.
#[instrument(name = "load_keywords", skip_all, fields(path = %path.display()))]
pub fn load_keywords(path: &Path) -> Result<HashMap<String, Color>, ScriptpadError> {
    let raw = fs::read_to_string(path).map_err(|e| ScriptpadError::KeywordLoad {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let keywords: Vec<Keyword> = serde_json::from_str(&raw).map_err(|e| {
        ScriptpadError::KeywordLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;
    let dictionary: HashMap<String, Color> = keywords
        .into_iter()
        .map(|keyword| (keyword.word, keyword.color))
        .collect();
    info!(count = dictionary.len(), "keyword dictionary loaded");
    Ok(dictionary)
}
