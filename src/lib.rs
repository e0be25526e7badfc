//! # Project Sitemap
//!
//! Builds a single JSON index of a static content repository. Every
//! immediate subdirectory of the projects root that carries a `content.json`
//! descriptor becomes one entry in `sitemap.json`; a static `index.html` can
//! be rendered from that artifact for browsing.
//!
//! # Architecture: Linear Pipeline
//!
//! ```text
//! 1. Scan      projects/  →  entries + diagnostics   (filesystem → records)
//! 2. Generate  entries    →  Sitemap                 (sort, stamp, count)
//! 3. Validate  Sitemap    →  ok | all violations     (read-only)
//! 4. Persist   Sitemap    →  sitemap.json            (single overwrite)
//! ```
//!
//! Every run regenerates the artifact from scratch; there is no incremental
//! state. A failing validation stops the run before anything is written.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the projects root, reads descriptors and feed directories |
//! | [`generate`] | Sorts entries and wraps them into a [`types::Sitemap`] |
//! | [`validate`] | Structural checks on a sitemap or any JSON document |
//! | [`persist`] | Reads and writes the artifact |
//! | [`render`] | Static `index.html` with project cards and JSON previews (Maud) |
//! | [`collate`] | Unicode (CLDR root) title ordering |
//! | [`config`] | Optional `sitemap.toml` loading, merging, and validation |
//! | [`types`] | Descriptor, entry, and sitemap records |
//! | [`output`] | CLI output formatting with status glyphs |
//!
//! # Failure Policy
//!
//! One broken project never sinks the run: a malformed descriptor is reported
//! and the project is left out. Structural problems with the assembled
//! sitemap, or a failed write, end the run with a non-zero exit code.

pub mod collate;
pub mod config;
pub mod generate;
pub mod output;
pub mod persist;
pub mod render;
pub mod scan;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
