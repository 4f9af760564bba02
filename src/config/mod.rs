//! Configuration module - application settings and the keyword dictionary
//!
//! This module provides functionality for:
//! - Loading configuration from a JSON file given on the command line
//! - Loading the keyword dictionary the highlighter consults
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `types` - Configuration struct definitions (Config, Palette, etc.)
//! - `loader` - File system loading and strict JSON parsing

mod loader;
mod types;

pub use loader::{load_config, load_keywords};
pub use types::{CommandConfig, Config, ErrorMessages, Keyword, Palette, Theme};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
