use serde::{Deserialize, Serialize};

use super::Edition;

/// A custom hostname attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDomain {
    #[serde(default)]
    pub canonical: bool,
    pub hostname: String,
    #[serde(default)]
    pub redirect: Option<String>,
}

/// A publication and its editions, as returned by `api/1/project.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub domain: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub custom_domains: Vec<CustomDomain>,
    #[serde(default)]
    pub editions: Vec<Edition>,
}

impl Project {
    /// Reorder `editions` with [`crate::sort_editions`]. Records are untouched.
    #[must_use]
    pub fn with_sorted_editions(mut self) -> Self {
        self.editions = crate::sort_editions(&self.editions);
        self
    }

    /// Look up an edition by its `path`.
    #[must_use]
    pub fn edition(&self, path: &str) -> Option<&Edition> {
        self.editions.iter().find(|e| e.path == path)
    }
}
