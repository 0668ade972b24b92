//! Edition archive endpoint.

use mag_core::Credential;

use crate::http::{AUTHENTICATE, check_response};
use crate::{ClientError, MetadataClient};

impl MetadataClient {
    /// URL of an edition's zip bundle.
    ///
    /// Edition paths are normally `/welcome`; a missing leading slash is added.
    #[must_use]
    pub fn edition_archive_url(&self, project_domain: &str, edition_path: &str) -> String {
        let origin = self.project_origin(project_domain);
        let path = edition_path.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{origin}/api/1/editions{path}.zip")
        } else {
            format!("{origin}/api/1/editions/{path}.zip")
        }
    }

    /// Start downloading an edition archive.
    ///
    /// Returns the response with its body unread so the caller can stream it.
    /// No overall timeout applies; only the connect timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if no API key is available, the connection
    /// fails, or the service returns a non-success status.
    pub async fn fetch_edition_archive(
        &self,
        project_domain: &str,
        edition_path: &str,
        credential: Option<&Credential>,
    ) -> Result<reqwest::Response, ClientError> {
        let credential = self.credential(credential)?;
        let url = self.edition_archive_url(project_domain, edition_path);
        tracing::debug!(%url, "requesting edition archive");

        let resp = self
            .http
            .get(&url)
            .header(AUTHENTICATE, credential.expose())
            .send()
            .await?;
        check_response(resp).await
    }
}
