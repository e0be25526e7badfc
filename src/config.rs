//! Builder configuration.
//!
//! Handles loading, validating, and merging the optional `sitemap.toml`.
//! Stock defaults reproduce the conventional repository layout, so the tool
//! runs with no config file and no arguments:
//!
//! ```text
//! ./
//! ├── sitemap.toml            # Optional overrides
//! ├── sitemap.json            # Generated artifact
//! ├── index.html              # Rendered viewer (render command)
//! └── projects/
//!     ├── alpha/
//!     │   └── content.json    # Project descriptor
//!     └── beta/
//!         ├── content.json
//!         └── feeds/
//!             ├── a.json
//!             └── z.json
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! projects_dir = "projects"       # Directory scanned for projects
//! output = "sitemap.json"         # Where the sitemap is written
//! base_path = "projects"          # Site-relative prefix of every project `path`
//! descriptor = "content.json"     # Descriptor filename inside each project
//! feeds_dir = "feeds"             # Feed subdirectory inside each project
//! feed_extension = "json"         # Extension a feed file must carry
//!
//! [index]
//! output = "index.html"
//! title = "Digital Asset Repository"
//! sitemap_url = "sitemap.json"    # Fetched by the page to refresh its cards
//!
//! [meta]
//! generator = "Digital Asset Repository Sitemap Generator"
//! version = "1.0.0"
//! description = "Auto-generated project index for static content repository"
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::types::SitemapMeta;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "sitemap.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Builder configuration loaded from `sitemap.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Directory whose immediate children are scanned as projects.
    pub projects_dir: String,
    /// Output path of the sitemap artifact.
    pub output: String,
    /// Site-relative prefix used to build each project's `path`.
    pub base_path: String,
    /// Descriptor filename that marks a directory as a project.
    pub descriptor: String,
    /// Per-project subdirectory holding feed files.
    pub feeds_dir: String,
    /// Extension (without the dot) a file needs to count as a feed.
    pub feed_extension: String,
    /// Static index page settings.
    pub index: IndexConfig,
    /// Fixed metadata block copied into every sitemap.
    pub meta: SitemapMeta,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            projects_dir: "projects".to_string(),
            output: "sitemap.json".to_string(),
            base_path: "projects".to_string(),
            descriptor: "content.json".to_string(),
            feeds_dir: "feeds".to_string(),
            feed_extension: "json".to_string(),
            index: IndexConfig::default(),
            meta: SitemapMeta::default(),
        }
    }
}

/// Settings for the rendered `index.html`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    pub output: String,
    pub title: String,
    /// URL the page fetches the sitemap from, relative to the page.
    pub sitemap_url: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            output: "index.html".to_string(),
            title: "Digital Asset Repository".to_string(),
            sitemap_url: "sitemap.json".to_string(),
        }
    }
}

impl SiteConfig {
    /// Validate that every path-like value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("projects_dir", &self.projects_dir),
            ("output", &self.output),
            ("descriptor", &self.descriptor),
            ("feeds_dir", &self.feeds_dir),
            ("feed_extension", &self.feed_extension),
            ("index.output", &self.index.output),
            ("index.sitemap_url", &self.index.sitemap_url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        for (key, value) in [("descriptor", &self.descriptor), ("feeds_dir", &self.feeds_dir)] {
            if value.contains('/') || value.contains('\\') {
                return Err(ConfigError::Validation(format!(
                    "{key} must be a single path component"
                )));
            }
        }
        if self.feed_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "feed_extension must not start with a dot".into(),
            ));
        }
        Ok(())
    }

    /// Prefix for every project `path`: normalized, `/`-separated, ending in `/`.
    ///
    /// - `"projects"` → `"projects/"`
    /// - `"./projects/"` → `"projects/"`
    /// - `""` or `"."` → `""` (projects live at the site root)
    pub fn project_path_prefix(&self) -> String {
        let normalized = self.base_path.replace('\\', "/");
        let segments: Vec<&str> = normalized
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        if segments.is_empty() {
            String::new()
        } else {
            format!("{}/", segments.join("/"))
        }
    }

    /// Feed filename suffix including the dot, e.g. `.json`.
    pub fn feed_suffix(&self) -> String {
        format!(".{}", self.feed_extension)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("stock defaults do not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto the stock defaults, then deserialize and validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from the given file, falling back to stock defaults when it
/// does not exist.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    let config = resolve_config(overlay)?;
    tracing::debug!(path = %path.display(), ?config, "resolved builder config");
    Ok(config)
}

/// Returns a fully-commented stock `sitemap.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Project Sitemap Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Directory whose immediate subdirectories are scanned as projects.
projects_dir = "projects"

# Where the generated sitemap is written (overwritten on every run).
output = "sitemap.json"

# Site-relative prefix of each project's `path` in the sitemap.
# "projects" produces paths like "projects/alpha/".
base_path = "projects"

# A subdirectory is a project only if it contains this file.
descriptor = "content.json"

# Per-project subdirectory scanned for feed files.
feeds_dir = "feeds"

# Extension (without the dot) a file needs to be listed as a feed.
feed_extension = "json"

# ---------------------------------------------------------------------------
# Rendered index page (render command)
# ---------------------------------------------------------------------------
[index]
output = "index.html"
title = "Digital Asset Repository"

# The page fetches this URL (relative to index.html) on load and rebuilds
# its cards from it, so it stays current after the sitemap is regenerated.
sitemap_url = "sitemap.json"

# ---------------------------------------------------------------------------
# Metadata block written into every sitemap
# ---------------------------------------------------------------------------
[meta]
generator = "Digital Asset Repository Sitemap Generator"
version = "1.0.0"
description = "Auto-generated project index for static content repository"
"##
}
