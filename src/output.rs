//! CLI output formatting for every pipeline stage.
//!
//! Each progress line leads with a status glyph so a run can be skimmed at a
//! glance:
//!
//! - `✓` a step succeeded or a project was found
//! - `⚠` something was skipped but the run continues
//! - `✗` the run is aborting
//!
//! # Output Format
//!
//! ```text
//! ✓ Found project: Alpha Project (alpha)
//! ⚠ Skipped broken: expected value at line 1 column 10
//! ✓ Sitemap validation passed
//! ✓ Sitemap generated: sitemap.json
//! ✓ Projects indexed: 2
//!
//! Sitemap Summary
//!     Total Projects: 2
//!     Generated: 2026-10-18T09:30:05.000Z
//!
//! Projects
//!     001 Alpha Project
//!     002 Beta (2 feeds)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to the terminal. Format functions are
//! pure: no I/O, no side effects. Warnings and errors go to stderr, everything
//! else to stdout.

use crate::scan::Diagnostic;
use crate::types::Sitemap;
use crate::validate::ValidationError;
use std::path::Path;

pub const OK: char = '\u{2713}';
pub const WARN: char = '\u{26a0}';
pub const FAIL: char = '\u{2717}';

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn feed_count(count: usize) -> String {
    match count {
        0 => String::new(),
        1 => " (1 feed)".to_string(),
        n => format!(" ({n} feeds)"),
    }
}

// ============================================================================
// Scan
// ============================================================================

/// Format one scan diagnostic as a status line.
pub fn format_diagnostic(diagnostic: &Diagnostic) -> String {
    match diagnostic {
        Diagnostic::RootMissing { path } => {
            format!("{WARN} Projects directory not found: {}", path.display())
        }
        Diagnostic::Found { id, title } => format!("{OK} Found project: {title} ({id})"),
        Diagnostic::Skipped { id, reason } => {
            format!("{WARN} Error reading descriptor for {id}: {reason}")
        }
    }
}

/// Print scan diagnostics, warnings to stderr.
pub fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        let line = format_diagnostic(diagnostic);
        if diagnostic.is_warning() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ============================================================================
// Validate
// ============================================================================

/// Format a validation outcome. The first line carries the verdict.
pub fn format_validation(result: &Result<(), ValidationError>) -> Vec<String> {
    match result {
        Ok(()) => vec![format!("{OK} Sitemap validation passed")],
        Err(err) => {
            let mut lines = vec![format!("{FAIL} Sitemap validation failed:")];
            lines.extend(
                err.violations
                    .iter()
                    .map(|v| format!("{}- {}", indent(1), v)),
            );
            lines
        }
    }
}

/// Print a validation outcome; failures go to stderr.
pub fn print_validation(result: &Result<(), ValidationError>) {
    for line in format_validation(result) {
        if result.is_ok() {
            println!("{}", line);
        } else {
            eprintln!("{}", line);
        }
    }
}

// ============================================================================
// Persist and summary
// ============================================================================

/// Lines reporting a successful write.
pub fn format_written(path: &Path, sitemap: &Sitemap) -> Vec<String> {
    vec![
        format!("{OK} Sitemap generated: {}", path.display()),
        format!("{OK} Projects indexed: {}", sitemap.total_projects),
    ]
}

/// Human-readable run summary: totals, then one line per project.
pub fn format_summary(sitemap: &Sitemap) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        "Sitemap Summary".to_string(),
        format!("{}Total Projects: {}", indent(1), sitemap.total_projects),
        format!("{}Generated: {}", indent(1), sitemap.generated_at),
    ];

    if !sitemap.projects.is_empty() {
        lines.push(String::new());
        lines.push("Projects".to_string());
        for (i, project) in sitemap.projects.iter().enumerate() {
            lines.push(format!(
                "{}{} {}{}",
                indent(1),
                format_index(i + 1),
                project.title,
                feed_count(project.feeds.len())
            ));
        }
    }

    lines
}

/// Print the write confirmation followed by the summary.
pub fn print_build_output(path: &Path, sitemap: &Sitemap) {
    for line in format_written(path, sitemap)
        .into_iter()
        .chain(format_summary(sitemap))
    {
        println!("{}", line);
    }
}

/// Line reporting a rendered index page.
pub fn format_rendered(path: &Path, sitemap: &Sitemap) -> String {
    format!(
        "{OK} Index page generated: {} ({} projects)",
        path.display(),
        sitemap.total_projects
    )
}

/// A fatal error line.
pub fn format_error(message: &str) -> String {
    format!("{FAIL} {message}")
}
