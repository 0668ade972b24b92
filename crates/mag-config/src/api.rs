//! Remote service configuration.

use mag_core::Credential;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_scheme() -> String {
    "https".to_string()
}

fn default_host() -> String {
    "h5mag.com".to_string()
}

fn default_projects_url() -> String {
    "https://api.h5mag.com/projects".to_string()
}

fn default_user_agent() -> String {
    concat!("magkit/", env!("CARGO_PKG_VERSION")).to_string()
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Default API key. Per-call keys take precedence.
    #[serde(default)]
    pub key: String,

    /// Scheme for project origins (`{scheme}://{domain}.{host}`).
    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Host suffix appended to a project domain.
    #[serde(default = "default_host")]
    pub host: String,

    /// Fixed origin used for every project instead of `{scheme}://{domain}.{host}`
    /// (staging mirrors, local fixtures). Empty means unset.
    #[serde(default)]
    pub origin: String,

    /// Endpoint listing every project visible to the key.
    #[serde(default = "default_projects_url")]
    pub projects_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Applies to metadata calls only; archive downloads are not capped.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            scheme: default_scheme(),
            host: default_host(),
            origin: String::new(),
            projects_url: default_projects_url(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Check if a default API key is configured.
    pub fn is_configured(&self) -> bool {
        !self.key.trim().is_empty()
    }

    /// The default credential, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the key cannot be sent as a header.
    pub fn credential(&self) -> Result<Option<Credential>, ConfigError> {
        if !self.is_configured() {
            return Ok(None);
        }
        Credential::parse(self.key.clone())
            .map(Some)
            .map_err(|e| ConfigError::InvalidValue {
                field: "api.key".into(),
                reason: e.to_string(),
            })
    }
}
