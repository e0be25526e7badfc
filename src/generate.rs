//! Sitemap assembly.
//!
//! Stage 2 of the build pipeline. Takes the scan report, orders the projects,
//! and wraps them in the [`Sitemap`] record with timestamps, count, and the
//! metadata block.
//!
//! ## Ordering
//!
//! Projects are sorted by title using [`TitleCollator`]. Projects whose
//! titles collate equal are ordered by `id`, which is unique, so the result
//! never depends on directory enumeration order. If the collator cannot be
//! built the sort falls back to code-point order and logs a warning.
//!
//! ## Timestamps
//!
//! `last_updated` (`YYYY-MM-DD`) and `generated_at` (RFC 3339 with millisecond
//! precision and a `Z` suffix) are both derived from one captured instant,
//! so they can never disagree about the date.

use crate::collate::TitleCollator;
use crate::config::SiteConfig;
use crate::scan::{self, Diagnostic, ScanError};
use crate::types::{ProjectEntry, Sitemap, SitemapMeta};
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::Path;

/// A generated sitemap together with the scan diagnostics that produced it.
#[derive(Debug)]
pub struct Generated {
    pub sitemap: Sitemap,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan `root` and assemble a sitemap stamped with the current time.
pub fn generate(root: &Path, config: &SiteConfig) -> Result<Generated, ScanError> {
    let report = scan::scan(root, config)?;
    let sitemap = assemble(report.projects, Utc::now(), &config.meta);
    tracing::info!(
        total = sitemap.total_projects,
        skipped = report.diagnostics.iter().filter(|d| d.is_warning()).count(),
        "generated sitemap"
    );
    Ok(Generated {
        sitemap,
        diagnostics: report.diagnostics,
    })
}

/// Sort `projects` and wrap them into a [`Sitemap`] generated at `now`.
pub fn assemble(mut projects: Vec<ProjectEntry>, now: DateTime<Utc>, meta: &SitemapMeta) -> Sitemap {
    sort_projects(&mut projects);
    Sitemap {
        last_updated: now.format("%Y-%m-%d").to_string(),
        generated_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        total_projects: projects.len(),
        projects,
        meta: meta.clone(),
    }
}

/// Order projects by collated title, then by `id`.
pub fn sort_projects(projects: &mut [ProjectEntry]) {
    match TitleCollator::new() {
        Ok(collator) => projects.sort_by(|a, b| {
            collator
                .compare(&a.title, &b.title)
                .then_with(|| a.id.cmp(&b.id))
        }),
        Err(err) => {
            tracing::warn!(error = %err, "title collator unavailable, sorting by code point");
            projects.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 5).unwrap()
    }

    #[test]
    fn timestamps_come_from_one_instant() {
        let sitemap = assemble(vec![], fixed_now(), &SitemapMeta::default());
        assert_eq!(sitemap.last_updated, "2026-10-18");
        assert_eq!(sitemap.generated_at, "2026-10-18T09:30:05.000Z");
    }

    #[test]
    fn empty_project_list() {
        let sitemap = assemble(vec![], fixed_now(), &SitemapMeta::default());
        assert_eq!(sitemap.total_projects, 0);
        assert!(sitemap.projects.is_empty());
        assert_eq!(sitemap.meta, SitemapMeta::default());
    }

    #[test]
    fn projects_sorted_by_title() {
        let projects = vec![
            entry("z", "Zeta"),
            entry("a", "alpha"),
            entry("m", "Mu"),
            entry("b", "beta"),
        ];
        let sitemap = assemble(projects, fixed_now(), &SitemapMeta::default());
        assert_eq!(project_titles(&sitemap.projects), vec!["alpha", "beta", "Mu", "Zeta"]);
    }

    #[test]
    fn accented_titles_sorted_like_a_reader_expects() {
        let projects = vec![
            entry("z", "Zebra"),
            entry("e", "Éclair"),
            entry("a", "Apple"),
            entry("f", "Ölfeld"),
            entry("o", "Orange"),
            entry("l", "apple"),
        ];
        let sitemap = assemble(projects, fixed_now(), &SitemapMeta::default());
        assert_eq!(
            project_titles(&sitemap.projects),
            vec!["apple", "Apple", "Éclair", "Ölfeld", "Orange", "Zebra"]
        );
        assert_eq!(project_ids(&sitemap.projects), vec!["l", "a", "e", "f", "o", "z"]);
    }

    #[test]
    fn equal_titles_tie_break_on_id() {
        let projects = vec![entry("c", "Same"), entry("a", "Same"), entry("b", "Same")];
        let sitemap = assemble(projects, fixed_now(), &SitemapMeta::default());
        assert_eq!(project_ids(&sitemap.projects), vec!["a", "b", "c"]);
    }

    #[test]
    fn total_matches_project_count() {
        let projects = vec![entry("a", "A"), entry("b", "B"), entry("c", "C")];
        let sitemap = assemble(projects, fixed_now(), &SitemapMeta::default());
        assert_eq!(sitemap.total_projects, sitemap.projects.len());
    }

    #[test]
    fn meta_block_comes_from_config() {
        let meta = SitemapMeta {
            generator: "gen".into(),
            version: "9".into(),
            description: "desc".into(),
        };
        let sitemap = assemble(vec![], fixed_now(), &meta);
        assert_eq!(sitemap.meta, meta);
    }

    #[test]
    fn alpha_beta_example_shape() {
        let tmp = TempDir::new().unwrap();
        write_project(tmp.path(), "alpha", r#"{"title":"Alpha Project"}"#);
        write_project(tmp.path(), "beta", r#"{"title":"Beta","tags":["x"]}"#);
        write_feeds(tmp.path(), "beta", &["z.json", "a.json"]);
        write_plain_dir(tmp.path(), "gamma");

        let generated = generate(tmp.path(), &SiteConfig::default()).unwrap();
        let value = serde_json::to_value(&generated.sitemap).unwrap();

        assert_eq!(value["total_projects"], json!(2));
        assert_eq!(
            value["projects"],
            json!([
                {"id": "alpha", "title": "Alpha Project", "path": "projects/alpha/", "feeds": []},
                {"id": "beta", "title": "Beta", "path": "projects/beta/", "feeds": ["a.json", "z.json"], "tags": ["x"]}
            ])
        );
    }

    #[test]
    fn titles_non_decreasing_over_fixtures() {
        let tmp = setup_fixtures();
        let generated = generate(&tmp.path().join("projects"), &SiteConfig::default()).unwrap();

        let collator = TitleCollator::new().unwrap();
        let titles = project_titles(&generated.sitemap.projects);
        for pair in titles.windows(2) {
            assert_ne!(
                collator.compare(pair[0], pair[1]),
                std::cmp::Ordering::Greater,
                "{pair:?} out of order"
            );
        }
    }

    #[test]
    fn generate_is_idempotent_modulo_timestamps() {
        let tmp = setup_fixtures();
        let root = tmp.path().join("projects");
        let config = SiteConfig::default();

        let mut first = generate(&root, &config).unwrap().sitemap;
        let mut second = generate(&root, &config).unwrap().sitemap;
        for sitemap in [&mut first, &mut second] {
            sitemap.last_updated.clear();
            sitemap.generated_at.clear();
        }
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string_pretty(&first).unwrap(),
            serde_json::to_string_pretty(&second).unwrap()
        );
    }

    #[test]
    fn generate_missing_root_is_empty_not_error() {
        let tmp = TempDir::new().unwrap();
        let generated = generate(&tmp.path().join("projects"), &SiteConfig::default()).unwrap();
        assert_eq!(generated.sitemap.total_projects, 0);
        assert!(matches!(
            generated.diagnostics.as_slice(),
            [Diagnostic::RootMissing { .. }]
        ));
    }
}
