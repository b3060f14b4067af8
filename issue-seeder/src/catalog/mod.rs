//! Issue catalog loading.
//!
//! A catalog is a TOML file holding an optional default target repository
//! and an ordered list of `[[issues]]` tables:
//!
//! ```text
//! repository = "owner/name"
//!
//! [[issues]]
//! title = "Set up CI"
//! labels = ["ci-cd"]
//! body = '''
//! ...
//! '''
//! ```

mod error;
mod record;

pub use error::CatalogError;
pub use record::IssueRecord;

use crate::tracker::RepoSlug;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Raw shape of a catalog file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    repository: Option<String>,
    #[serde(default)]
    issues: Vec<IssueRecord>,
}

/// A validated, immutable list of issues to submit.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    repository: Option<RepoSlug>,
    issues: Vec<IssueRecord>,
}

impl Catalog {
    /// Builds a catalog from records already in memory.
    pub fn new(repository: Option<RepoSlug>, issues: Vec<IssueRecord>) -> Self {
        Self { repository, issues }
    }

    /// Parses and validates catalog TOML.
    ///
    /// `origin` names the source in error messages (usually the file path).
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the TOML is malformed, the repository is not
    /// in `owner/name` form, or an issue has a blank title.
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::TomlError {
            path: origin.to_string(),
            source: e,
        })?;

        let repository = file
            .repository
            .map(|raw| {
                raw.parse::<RepoSlug>()
                    .map_err(|e| CatalogError::ValidationError {
                        path: origin.to_string(),
                        message: e.to_string(),
                    })
            })
            .transpose()?;

        for (index, issue) in file.issues.iter().enumerate() {
            issue
                .validate()
                .map_err(|message| CatalogError::ValidationError {
                    path: origin.to_string(),
                    message: format!("issue {}: {message}", index + 1),
                })?;
        }

        Ok(Self {
            repository,
            issues: file.issues,
        })
    }

    /// Default target repository declared by the catalog, if any.
    pub fn repository(&self) -> Option<&RepoSlug> {
        self.repository.as_ref()
    }

    /// Issues in submission order.
    pub fn issues(&self) -> &[IssueRecord] {
        &self.issues
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if the catalog holds no issues.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Loads a catalog from a TOML file.
///
/// # Errors
///
/// Returns [`CatalogError`] if the file can't be read or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    debug!(path = %path.display(), "Loading catalog");

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog = Catalog::from_toml_str(&content, &path.display().to_string())?;
    info!(count = catalog.len(), path = %path.display(), "Loaded catalog");
    Ok(catalog)
}
