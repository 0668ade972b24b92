//! Single project endpoint.

use mag_core::{Credential, Project};

use crate::http::{AUTHENTICATE, check_response, decode_json};
use crate::{ClientError, MetadataClient};

/// Per-call options for [`MetadataClient::get_project_and_editions`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Overrides the client's default API key.
    pub credential: Option<Credential>,
    /// Order editions most recent first (see [`mag_core::sort_editions`]).
    pub sort: bool,
}

impl MetadataClient {
    /// Fetch one project with all of its editions.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if no API key is available, the request fails,
    /// the service returns a non-success status, or the body is not a project.
    pub async fn get_project_and_editions(
        &self,
        project_domain: &str,
        options: &RequestOptions,
    ) -> Result<Project, ClientError> {
        let credential = self.credential(options.credential.as_ref())?;
        let url = format!("{}/api/1/project.json", self.project_origin(project_domain));
        tracing::debug!(%url, "fetching project");

        let resp = self
            .http
            .get(&url)
            .header(AUTHENTICATE, credential.expose())
            .timeout(self.settings.request_timeout)
            .send()
            .await?;
        let project: Project = decode_json(check_response(resp).await?).await?;

        tracing::debug!(
            domain = %project.domain,
            editions = project.editions.len(),
            "project fetched"
        );
        Ok(if options.sort {
            project.with_sorted_editions()
        } else {
            project
        })
    }
}
