//! Configuration type definitions
//!
//! The shapes here mirror the on-disk JSON exactly. Decoding is strict:
//! unknown fields are rejected so a typo in the file surfaces as a named
//! load error instead of silently dropped data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::color::Color;
use crate::error::ScriptpadError;

/// Top-level configuration, loaded once at startup and passed by reference
/// into every component that needs it. There is no global fallback: a file
/// that fails to decode is a fatal startup error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub command: CommandConfig,
    pub errors: ErrorMessages,
    pub font_size: u32,
    /// Path to the keyword dictionary JSON file.
    pub keywords_json: PathBuf,
    /// Lines starting with this prefix are treated as error lines.
    pub error_prefix: String,
    pub colors: Palette,
}

impl Config {
    /// Look up a theme by name from the palette.
    pub fn theme(&self, name: &str) -> Result<&Theme, ScriptpadError> {
        self.colors
            .themes
            .get(name)
            .ok_or_else(|| ScriptpadError::UnknownTheme {
                name: name.to_string(),
            })
    }
}

/// How to invoke the external interpreter/compiler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CommandConfig {
    /// Executable resolved through the ambient PATH.
    pub executable: String,
    /// The script file; overwritten with the editor contents before each run.
    pub script_path: PathBuf,
}

/// User-facing messages for run failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ErrorMessages {
    pub compiler_not_found: String,
    pub generic: String,
}

/// Fixed colors plus the named theme table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Palette {
    pub error: Color,
    pub primary: Color,
    pub string: Color,
    pub comment: Color,
    pub themes: HashMap<String, Theme>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Theme {
    pub text: Color,
    pub background: Color,
    pub container: Color,
}

/// One entry of the keyword dictionary file (a JSON array of these).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Keyword {
    pub word: String,
    pub color: Color,
}
