//! Startup loading and validation of the catalog and greeting files.

use std::path::Path;

use crate::error::CatalogError;

use super::model::{Catalog, CatalogEntry, Greeting, MenuOption};

/// A configuration-authoring problem found at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// An option label with no catalog entry. Selecting it yields the
    /// neutral fallback reply.
    DanglingOption { referenced_by: String, label: String },
    /// A catalog key equal to the back label. Option lists turn that text
    /// into the back command, so the entry is unreachable from menus.
    BackLabelCollision { label: String },
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DanglingOption {
                referenced_by,
                label,
            } => write!(f, "'{referenced_by}' offers '{label}' which has no entry"),
            Self::BackLabelCollision { label } => {
                write!(f, "entry '{label}' collides with the back label")
            }
        }
    }
}

impl Catalog {
    /// Check that every offered label resolves and nothing shadows the back
    /// label. Cycles are allowed.
    pub fn validate(&self, greeting: &Greeting, back_label: &str) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        let mut check = |referenced_by: &str, options: &[MenuOption]| {
            for option in options {
                let MenuOption::Select(label) = option else {
                    continue;
                };
                if !self.contains(label) {
                    issues.push(CatalogIssue::DanglingOption {
                        referenced_by: referenced_by.to_string(),
                        label: label.clone(),
                    });
                }
            }
        };

        check("initial greeting", &greeting.options);
        for label in self.labels() {
            if let Some(CatalogEntry::Menu { options, .. }) = self.lookup(label) {
                check(label, options);
            }
        }

        if self.contains(back_label) {
            issues.push(CatalogIssue::BackLabelCollision {
                label: back_label.to_string(),
            });
        }

        issues
    }
}

/// Catalog and greeting read from disk.
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub greeting: Greeting,
    pub issues: Vec<CatalogIssue>,
}

fn read(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Load both files, validate, and log every issue.
///
/// With `strict` set, any issue fails the load.
pub fn load_catalog(
    responses_path: &Path,
    options_path: &Path,
    back_label: &str,
    strict: bool,
) -> Result<LoadedCatalog, CatalogError> {
    let catalog = Catalog::from_json_str(&read(responses_path)?, back_label)?;
    let greeting = Greeting::from_json_str(&read(options_path)?, back_label)?;
    let issues = catalog.validate(&greeting, back_label);

    for issue in &issues {
        tracing::warn!(%issue, "Catalog issue");
    }

    if strict && !issues.is_empty() {
        let summary = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(CatalogError::Invalid {
            count: issues.len(),
            summary,
        });
    }

    tracing::info!(
        entries = catalog.len(),
        greeting_options = greeting.options.len(),
        issues = issues.len(),
        "Loaded response catalog from {}",
        responses_path.display()
    );

    Ok(LoadedCatalog {
        catalog,
        greeting,
        issues,
    })
}
