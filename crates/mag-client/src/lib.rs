//! # mag-client
//!
//! HTTP client for the magazine-hosting service:
//! - `GET {origin}/api/1/project.json`: one project with its editions
//! - `POST {projects_url}`: the project index visible to an API key
//! - `GET {origin}/api/1/editions{path}.zip`: an edition's offline bundle
//!
//! `{origin}` is `{scheme}://{domain}.{host}` unless a fixed origin is set.
//! Every request carries the API key in the `Authenticate` header; a key
//! passed with a call overrides the client's default.

mod archive;
mod error;
mod http;
mod project;
mod projects;

pub use error::ClientError;
pub use project::RequestOptions;
pub use projects::ListOptions;

use std::time::Duration;

use mag_config::ApiConfig;
use mag_core::Credential;

// ── Settings ───────────────────────────────────────────────────────

/// Connection settings for [`MetadataClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub scheme: String,
    pub host: String,
    /// Fixed origin for every project; bypasses `{scheme}://{domain}.{host}`.
    pub origin_override: Option<String>,
    pub projects_url: String,
    /// Default API key used when a call does not bring its own.
    pub credential: Option<Credential>,
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Per-request cap for metadata calls. Archive downloads are not capped.
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        let api = ApiConfig::default();
        Self {
            scheme: api.scheme,
            host: api.host,
            origin_override: None,
            projects_url: api.projects_url,
            credential: None,
            user_agent: api.user_agent,
            connect_timeout: Duration::from_secs(api.connect_timeout_secs),
            request_timeout: Duration::from_secs(api.request_timeout_secs),
        }
    }
}

impl ClientSettings {
    /// Build settings from the `[api]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns [`mag_config::ConfigError`] if the configured key is invalid.
    pub fn from_config(api: &ApiConfig) -> Result<Self, mag_config::ConfigError> {
        Ok(Self {
            scheme: api.scheme.clone(),
            host: api.host.clone(),
            origin_override: Some(api.origin.trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty()),
            projects_url: api.projects_url.clone(),
            credential: api.credential()?,
            user_agent: api.user_agent.clone(),
            connect_timeout: Duration::from_secs(api.connect_timeout_secs),
            request_timeout: Duration::from_secs(api.request_timeout_secs),
        })
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// HTTP client for project metadata and edition archives.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    http: reqwest::Client,
    settings: ClientSettings,
}

impl MetadataClient {
    /// Create a client from settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client` fails
    /// to build (e.g. TLS backend initialization).
    pub fn new(settings: ClientSettings) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .connect_timeout(settings.connect_timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    #[must_use]
    pub const fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Origin serving a project's API, e.g. `https://testproject.h5mag.com`.
    #[must_use]
    pub fn project_origin(&self, project_domain: &str) -> String {
        self.settings.origin_override.clone().unwrap_or_else(|| {
            format!(
                "{}://{project_domain}.{}",
                self.settings.scheme, self.settings.host
            )
        })
    }

    /// Pick the call-level key, else the client default.
    fn credential<'a>(&'a self, call: Option<&'a Credential>) -> Result<&'a Credential, ClientError> {
        Credential::resolve(call, self.settings.credential.as_ref())
            .ok_or(ClientError::MissingCredential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with(settings: ClientSettings) -> MetadataClient {
        MetadataClient::new(settings).unwrap()
    }

    #[test]
    fn origin_is_built_from_domain_and_host() {
        let client = client_with(ClientSettings::default());
        assert_eq!(
            client.project_origin("testproject"),
            "https://testproject.h5mag.com"
        );
    }

    #[test]
    fn origin_override_wins() {
        let api = ApiConfig {
            origin: "http://127.0.0.1:9000/".into(),
            ..ApiConfig::default()
        };
        let client = client_with(ClientSettings::from_config(&api).unwrap());
        assert_eq!(client.project_origin("testproject"), "http://127.0.0.1:9000");
    }

    #[test]
    fn credential_resolution_order() {
        let default = Credential::parse("default-key").unwrap();
        let call = Credential::parse("call-key").unwrap();

        let bare = client_with(ClientSettings::default());
        assert!(matches!(
            bare.credential(None),
            Err(ClientError::MissingCredential)
        ));
        assert_eq!(bare.credential(Some(&call)).unwrap().expose(), "call-key");

        let keyed = client_with(ClientSettings {
            credential: Some(default),
            ..ClientSettings::default()
        });
        assert_eq!(keyed.credential(None).unwrap().expose(), "default-key");
        assert_eq!(keyed.credential(Some(&call)).unwrap().expose(), "call-key");
    }
}
