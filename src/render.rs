//! Static index page.
//!
//! Renders a sitemap artifact as `index.html`: one card per project with
//! links to the project root, its descriptor, and each feed. The cards are
//! only the initial content. The embedded script fetches the sitemap from
//! `index.sitemap_url` on load and rebuilds the list from it, or replaces the
//! list with an error panel when the fetch fails. It also intercepts clicks
//! on `.json` links and previews the document in an overlay, falling back to
//! opening the link when that fetch fails.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every interpolated value (titles, ids, tags) is escaped automatically,
//! so descriptor content cannot inject markup.

use crate::config::SiteConfig;
use crate::persist::{self, PersistError};
use crate::types::{ProjectEntry, Sitemap};
use crate::validate::{self, ValidationError};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const CSS: &str = include_str!("../static/style.css");
const VIEWER_JS: &str = include_str!("../static/viewer.js");

/// Read, validate, and render the artifact at `sitemap_path` into `index_path`.
///
/// Returns the rendered sitemap so callers can summarize it.
pub fn render_file(
    sitemap_path: &Path,
    index_path: &Path,
    config: &SiteConfig,
) -> Result<Sitemap, RenderError> {
    let value = persist::read_sitemap_value(sitemap_path)?;
    validate::validate_value(&value)?;
    let sitemap = persist::sitemap_from_value(value, sitemap_path)?;

    let page = render_index(&sitemap, config).into_string();
    fs::write(index_path, page).map_err(|source| RenderError::Write {
        path: index_path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %index_path.display(), projects = sitemap.total_projects, "wrote index page");
    Ok(sitemap)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
                script { (PreEscaped(VIEWER_JS)) }
            }
        }
    }
}

/// Renders one project card.
fn project_card(project: &ProjectEntry, config: &SiteConfig) -> Markup {
    html! {
        div.project-card {
            h3 { (project.title) }
            p { "Project ID: " code { (project.id) } }
            @if let Some(description) = &project.description {
                p.description { (description) }
            }
            @if project.version.is_some() || project.status.is_some() {
                p.project-meta {
                    @if let Some(version) = &project.version {
                        span.version { "v" (version) }
                    }
                    @if let Some(status) = &project.status {
                        " " span.status { (status) }
                    }
                }
            }
            @if let Some(tags) = project.tags.as_ref().filter(|t| !t.is_empty()) {
                ul.tags {
                    @for tag in tags {
                        li { (tag) }
                    }
                }
            }
            div.project-links {
                a href=(project.path) { "View Project" }
                a href={ (project.path) (config.descriptor) } { "Content JSON" }
            }
            @if !project.feeds.is_empty() {
                div.project-feeds {
                    h4 { "Feeds" }
                    div.feed-list {
                        @for feed in &project.feeds {
                            a.feed-link href=(project.feed_href(&config.feeds_dir, feed)) { (feed) }
                        }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page with one card per project.
pub fn render_index(sitemap: &Sitemap, config: &SiteConfig) -> Markup {
    let content = html! {
        header.site-header {
            h1 { (config.index.title) }
            p { (sitemap.meta.description) }
        }
        main {
            div.project-list #project-list
                data-sitemap=(config.index.sitemap_url)
                data-descriptor=(config.descriptor)
                data-feeds-dir=(config.feeds_dir)
            {
                @if sitemap.projects.is_empty() {
                    div.no-projects { "No projects found." }
                } @else {
                    @for project in &sitemap.projects {
                        (project_card(project, config))
                    }
                }
            }
        }
        footer.site-footer {
            (sitemap.total_projects) " projects · generated " (sitemap.generated_at)
            " by " (sitemap.meta.generator) " " (sitemap.meta.version)
        }
    };

    base_document(&config.index.title, content)
}

// ============================================================================
// Tests
// ============================================================================
