//! Shared test utilities for the project-sitemap test suite.
//!
//! Provides fixture setup, project-tree builders, lookup helpers, and bulk
//! extractors for scan and generate results.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_project(tmp.path(), "beta", r#"{"title":"Beta"}"#);
//! write_feeds(tmp.path(), "beta", &["a.json"]);
//!
//! let report = scan(tmp.path(), &SiteConfig::default()).unwrap();
//! assert_eq!(find_project(&report.projects, "beta").feeds, vec!["a.json"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::types::ProjectEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/` to a temp directory and return it.
///
/// The copy has a `projects/` tree with:
/// - `alpha`: title only
/// - `beta`: title, tags, and a `feeds/` directory with mixed files
/// - `delta`: no title, so its id is used
/// - `broken`: malformed descriptor
/// - `gamma`: no descriptor at all
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Project tree builders
// =========================================================================

/// Create `<root>/<id>/content.json` with the given descriptor text.
pub fn write_project(root: &Path, id: &str, descriptor: &str) {
    let dir = root.join(id);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("content.json"), descriptor).unwrap();
}

/// Create `<root>/<id>/feeds/` holding empty-object files with the given names.
pub fn write_feeds(root: &Path, id: &str, names: &[&str]) {
    let dir = root.join(id).join("feeds");
    fs::create_dir_all(&dir).unwrap();
    for name in names {
        fs::write(dir.join(name), "{}").unwrap();
    }
}

/// Create a directory with no descriptor.
pub fn write_plain_dir(root: &Path, name: &str) {
    fs::create_dir_all(root.join(name)).unwrap();
}

/// A minimal entry with the conventional `projects/<id>/` path.
pub fn entry(id: &str, title: &str) -> ProjectEntry {
    ProjectEntry {
        id: id.to_string(),
        title: title.to_string(),
        path: format!("projects/{id}/"),
        feeds: vec![],
        description: None,
        version: None,
        status: None,
        tags: None,
    }
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Find a project by id. Panics if not found.
pub fn find_project<'a>(projects: &'a [ProjectEntry], id: &str) -> &'a ProjectEntry {
    projects.iter().find(|p| p.id == id).unwrap_or_else(|| {
        let ids = project_ids(projects);
        panic!("project '{id}' not found. Available: {ids:?}")
    })
}

/// All project ids in order.
pub fn project_ids(projects: &[ProjectEntry]) -> Vec<&str> {
    projects.iter().map(|p| p.id.as_str()).collect()
}

/// All project titles in order.
pub fn project_titles(projects: &[ProjectEntry]) -> Vec<&str> {
    projects.iter().map(|p| p.title.as_str()).collect()
}
