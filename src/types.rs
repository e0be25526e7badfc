//! Records shared by every stage: the descriptor read from disk, the
//! per-project entry, and the sitemap artifact itself.
//!
//! [`Sitemap`] and [`ProjectEntry`] serialize to exactly the shape browsers
//! consume from `sitemap.json`, so field order here is the field order in the
//! file. Optional passthrough fields are omitted, never written as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The sitemap artifact written to `sitemap.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sitemap {
    /// Calendar date of generation, `YYYY-MM-DD` (UTC).
    pub last_updated: String,
    /// Full generation instant, e.g. `2026-10-18T09:30:00.000Z`.
    pub generated_at: String,
    pub total_projects: usize,
    pub projects: Vec<ProjectEntry>,
    pub meta: SitemapMeta,
}

/// Fixed block identifying the tool that produced the artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapMeta {
    pub generator: String,
    pub version: String,
    pub description: String,
}

impl Default for SitemapMeta {
    fn default() -> Self {
        Self {
            generator: "Digital Asset Repository Sitemap Generator".to_string(),
            version: "1.0.0".to_string(),
            description: "Auto-generated project index for static content repository".to_string(),
        }
    }
}

/// One discovered project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    /// Directory name under the projects root.
    pub id: String,
    /// Descriptor title, or `id` when the descriptor has none.
    pub title: String,
    /// Relative path to the project root, always ending in `/`.
    pub path: String,
    /// Feed filenames inside `<path>feeds/`, sorted ascending.
    pub feeds: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Present iff the descriptor's `tags` is an array. Only the string
    /// elements are kept, in their original order; numbers, objects, and
    /// `null` inside the array are dropped so consumers always see strings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ProjectEntry {
    /// Link to a feed file relative to the site root.
    pub fn feed_href(&self, feeds_dir: &str, feed: &str) -> String {
        format!("{}{}/{}", self.path, feeds_dir, feed)
    }
}

/// Metadata pulled out of a project's `content.json`.
///
/// Descriptors are authored by hand, so extraction is lenient: any JSON
/// document is accepted, and fields with an unexpected shape are treated as
/// absent instead of failing the project.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDescriptor {
    pub title: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    pub status: Option<String>,
    /// `Some` iff the descriptor's `tags` is an array. Non-string elements are dropped.
    pub tags: Option<Vec<String>>,
}

impl ProjectDescriptor {
    /// Parse descriptor text. Only malformed JSON is an error.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value))
    }

    /// Extract known fields from an already-parsed document.
    ///
    /// Non-object documents (arrays, strings, numbers) contribute nothing.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let tags = match object.get("tags") {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => None,
        };

        Self {
            title: non_empty_string(object, "title"),
            description: non_empty_string(object, "description"),
            version: non_empty_string(object, "version"),
            status: non_empty_string(object, "status"),
            tags,
        }
    }
}

fn non_empty_string(object: &Map<String, Value>, key: &str) -> Option<String> {
    object
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
