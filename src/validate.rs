//! Structural validation of a sitemap before it is written.
//!
//! The same rules apply to a freshly generated [`Sitemap`] and to an artifact
//! read back from disk (the `check` and `render` commands), which is checked
//! in its JSON value form. Every violation is collected; validation never
//! stops at the first problem.
//!
//! In the JSON form a field counts as missing when it is absent or falsy:
//! `null`, `false`, `0`, or the empty string. In the typed form the only
//! falsy value a field can hold is the empty string.

use crate::types::Sitemap;
use serde_json::Value;
use thiserror::Error;

/// A single structural problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Violation {
    #[error("Missing or invalid projects array")]
    ProjectsNotArray,
    #[error("total_projects is {found:?} but projects has {actual} entries")]
    CountMismatch { found: Option<u64>, actual: usize },
    #[error("Project missing id (title: {title}, path: {path})")]
    MissingId { title: String, path: String },
    #[error("Project missing title: {0}")]
    MissingTitle(String),
    #[error("Project missing path: {0}")]
    MissingPath(String),
}

/// All violations found in one sitemap.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Sitemap validation failed with {} problem(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

/// Whether a required entry field is present, and how to name it in messages.
struct Field {
    present: bool,
    label: String,
}

struct RequiredFields {
    id: Field,
    title: Field,
    path: Field,
}

/// Validate a typed sitemap.
pub fn validate(sitemap: &Sitemap) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    let actual = sitemap.projects.len();
    if sitemap.total_projects != actual {
        violations.push(Violation::CountMismatch {
            found: Some(sitemap.total_projects as u64),
            actual,
        });
    }
    for project in &sitemap.projects {
        let field = |value: &str| Field {
            present: !value.is_empty(),
            label: value.to_string(),
        };
        check_project(
            RequiredFields {
                id: field(&project.id),
                title: field(&project.title),
                path: field(&project.path),
            },
            &mut violations,
        );
    }

    finish(violations)
}

/// Validate an arbitrary JSON document as a sitemap.
pub fn validate_value(value: &Value) -> Result<(), ValidationError> {
    let mut violations = Vec::new();

    match value.get("projects").and_then(Value::as_array) {
        None => violations.push(Violation::ProjectsNotArray),
        Some(projects) => {
            let found = value.get("total_projects").and_then(Value::as_u64);
            if found != Some(projects.len() as u64) {
                violations.push(Violation::CountMismatch {
                    found,
                    actual: projects.len(),
                });
            }
            for project in projects {
                let field = |key: &str| {
                    let value = project.get(key);
                    Field {
                        present: is_truthy(value),
                        label: label(value),
                    }
                };
                check_project(
                    RequiredFields {
                        id: field("id"),
                        title: field("title"),
                        path: field("path"),
                    },
                    &mut violations,
                );
            }
        }
    }

    finish(violations)
}

fn finish(violations: Vec<Violation>) -> Result<(), ValidationError> {
    if violations.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = violations.len(), "sitemap failed validation");
        Err(ValidationError { violations })
    }
}

fn check_project(fields: RequiredFields, violations: &mut Vec<Violation>) {
    let RequiredFields { id, title, path } = fields;
    if !id.present {
        violations.push(Violation::MissingId {
            title: title.label,
            path: path.label,
        });
    }
    if !title.present {
        violations.push(Violation::MissingTitle(id.label.clone()));
    }
    if !path.present {
        violations.push(Violation::MissingPath(id.label));
    }
}

fn label(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "undefined".to_string(),
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
