//! Local edition storage configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_editions_dir() -> PathBuf {
    dirs::data_dir().map_or_else(
        || PathBuf::from("editions"),
        |p| p.join("magkit").join("editions"),
    )
}

fn default_charset() -> String {
    "UTF-8".to_string()
}

const fn default_rollback_on_failure() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root under which bundles are stored as `{domain}/{edition path}`.
    #[serde(default = "default_editions_dir")]
    pub editions_dir: PathBuf,

    /// Encoding label for archive entry names.
    #[serde(default = "default_charset")]
    pub charset: String,

    /// Clear a bundle directory when acquisition fails part way.
    #[serde(default = "default_rollback_on_failure")]
    pub rollback_on_failure: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            editions_dir: default_editions_dir(),
            charset: default_charset(),
            rollback_on_failure: default_rollback_on_failure(),
        }
    }
}

impl StorageConfig {
    /// Bundle directory for one edition, e.g. `{editions_dir}/testproject/welcome`.
    pub fn edition_dir(&self, project_domain: &str, edition_path: &str) -> PathBuf {
        let mut dir = self.editions_dir.join(project_domain);
        for segment in edition_path.split('/').filter(|s| !s.is_empty() && *s != "..") {
            dir.push(segment);
        }
        dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StorageConfig::default();
        assert_eq!(config.charset, "UTF-8");
        assert!(config.rollback_on_failure);
        assert!(config.editions_dir.ends_with("editions"));
    }

    #[test]
    fn edition_dir_joins_path_segments() {
        let config = StorageConfig {
            editions_dir: PathBuf::from("/data"),
            ..StorageConfig::default()
        };
        assert_eq!(
            config.edition_dir("testproject", "/welcome"),
            PathBuf::from("/data/testproject/welcome")
        );
        assert_eq!(
            config.edition_dir("testproject", "2022/spring/"),
            PathBuf::from("/data/testproject/2022/spring")
        );
        assert_eq!(
            config.edition_dir("testproject", "/../../etc"),
            PathBuf::from("/data/testproject/etc")
        );
    }
}
