//! Filesystem scanning.
//!
//! Stage 1 of the build pipeline. Walks the immediate children of the projects
//! root and turns every directory carrying a descriptor into a
//! [`ProjectEntry`].
//!
//! ## Directory Structure
//!
//! ```text
//! projects/                        # Scan root
//! ├── alpha/                       # Project (has content.json)
//! │   └── content.json
//! ├── beta/
//! │   ├── content.json
//! │   └── feeds/                   # Optional feed directory
//! │       ├── a.json               # Feed (matching extension)
//! │       ├── z.json
//! │       └── notes.txt            # Ignored
//! └── gamma/                       # No descriptor: not a project, skipped silently
//!     └── readme.md
//! ```
//!
//! ## Failure Policy
//!
//! Problems with a single project never abort the scan. An unreadable or
//! malformed descriptor excludes that project and is reported as a
//! [`Diagnostic::Skipped`]; scanning continues with the next directory. A
//! missing root is not an error either: it yields an empty report carrying
//! [`Diagnostic::RootMissing`]. The only fatal case is a root that exists but
//! cannot be listed.
//!
//! ## Ordering
//!
//! Directories are enumerated in file-name order so a scan is reproducible
//! across platforms. The final sitemap order is decided later by
//! [`crate::generate`]; feeds are sorted here.

use crate::config::SiteConfig;
use crate::types::{ProjectDescriptor, ProjectEntry};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Projects root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Cannot list projects directory {path}: {source}")]
    ReadRoot {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Why a single project was excluded from the scan.
#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("cannot read descriptor: {0}")]
    ReadDescriptor(#[source] std::io::Error),
    #[error("{0}")]
    ParseDescriptor(#[from] serde_json::Error),
    #[error("cannot list feeds: {0}")]
    ReadFeeds(#[from] walkdir::Error),
    #[error("directory name is not valid UTF-8")]
    NonUtf8Name,
}

/// Something the scan observed that callers may want to report.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The scan root does not exist; the report is empty.
    RootMissing { path: PathBuf },
    /// A project was discovered and included.
    Found { id: String, title: String },
    /// A directory with a descriptor was excluded.
    Skipped { id: String, reason: String },
}

impl Diagnostic {
    pub fn is_warning(&self) -> bool {
        !matches!(self, Diagnostic::Found { .. })
    }
}

/// Projects discovered by a scan, plus what happened along the way.
#[derive(Debug, Default)]
pub struct ScanReport {
    /// Entries in directory enumeration order.
    pub projects: Vec<ProjectEntry>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanReport {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }
}

/// Scan `root` for project directories.
pub fn scan(root: &Path, config: &SiteConfig) -> Result<ScanReport, ScanError> {
    let mut report = ScanReport::default();

    if !root.exists() {
        tracing::debug!(root = %root.display(), "projects directory not found");
        report.diagnostics.push(Diagnostic::RootMissing {
            path: root.to_path_buf(),
        });
        return Ok(report);
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let prefix = config.project_path_prefix();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.path() == Some(root) || err.depth() == 0 => {
                return Err(ScanError::ReadRoot {
                    path: root.to_path_buf(),
                    source: err,
                });
            }
            Err(err) => {
                let id = err
                    .path()
                    .and_then(Path::file_name)
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                report.diagnostics.push(Diagnostic::Skipped {
                    id,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        if !dir.join(&config.descriptor).exists() {
            tracing::debug!(dir = %dir.display(), "no descriptor, not a project");
            continue;
        }

        let id = entry.file_name().to_string_lossy().into_owned();
        match build_entry(dir, &prefix, config) {
            Ok(project) => {
                tracing::debug!(id = %project.id, title = %project.title, feeds = project.feeds.len(), "found project");
                report.diagnostics.push(Diagnostic::Found {
                    id: project.id.clone(),
                    title: project.title.clone(),
                });
                report.projects.push(project);
            }
            Err(err) => {
                tracing::debug!(%id, error = %err, "skipping project");
                report.diagnostics.push(Diagnostic::Skipped {
                    id,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(report)
}

/// Build the entry for one project directory known to hold a descriptor.
fn build_entry(dir: &Path, prefix: &str, config: &SiteConfig) -> Result<ProjectEntry, ProjectError> {
    let id = dir
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(ProjectError::NonUtf8Name)?
        .to_string();

    let text = fs::read_to_string(dir.join(&config.descriptor)).map_err(ProjectError::ReadDescriptor)?;
    let descriptor = ProjectDescriptor::parse(&text)?;

    let feeds_dir = dir.join(&config.feeds_dir);
    let feeds = if feeds_dir.is_dir() {
        collect_feeds(&feeds_dir, &config.feed_suffix())?
    } else {
        Vec::new()
    };

    Ok(ProjectEntry {
        title: descriptor.title.unwrap_or_else(|| id.clone()),
        path: format!("{prefix}{id}/"),
        id,
        feeds,
        description: descriptor.description,
        version: descriptor.version,
        status: descriptor.status,
        tags: descriptor.tags,
    })
}

/// List feed filenames directly inside `dir`, sorted ascending.
fn collect_feeds(dir: &Path, suffix: &str) -> Result<Vec<String>, walkdir::Error> {
    let mut feeds = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && name.ends_with(suffix)
        {
            feeds.push(name.to_string());
        }
    }
    feeds.sort();
    Ok(feeds)
}
