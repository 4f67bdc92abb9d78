pub mod loader;

use shared::models::project::{ProjectRequirement, ProjectSummary};
use std::sync::Arc;

pub use loader::{load_from_path, load_from_reader, CatalogError, RecordError};

/// The immutable, non-empty set of projects predictions are computed against.
///
/// Cloning is cheap; every clone shares the same project list.
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Arc<[ProjectRequirement]>,
}

impl Catalog {
    pub fn new(projects: Vec<ProjectRequirement>) -> Result<Self, CatalogError> {
        if projects.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self {
            projects: projects.into(),
        })
    }

    pub fn projects(&self) -> &[ProjectRequirement] {
        &self.projects
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectRequirement> {
        self.projects.iter()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    // Always false; a catalog is rejected at construction when empty.
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary::from_projects(self.iter())
    }
}
