//! Project index endpoint.

use mag_core::{Credential, ProjectListEntry, filter_projects_with_latest_edition};

use crate::http::{AUTHENTICATE, check_response, decode_json};
use crate::{ClientError, MetadataClient};

/// Per-call options for [`MetadataClient::get_projects_list`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Overrides the client's default API key.
    pub credential: Option<Credential>,
    /// Drop projects whose `latest_edition` is `null`.
    pub filter_by_has_latest_edition: bool,
}

impl MetadataClient {
    /// Fetch every project visible to the API key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if no API key is available, the request fails,
    /// the service returns a non-success status, or the body is not a list.
    pub async fn get_projects_list(
        &self,
        options: &ListOptions,
    ) -> Result<Vec<ProjectListEntry>, ClientError> {
        let credential = self.credential(options.credential.as_ref())?;
        tracing::debug!(url = %self.settings.projects_url, "fetching project index");

        let resp = self
            .http
            .post(&self.settings.projects_url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("Version", "1")
            .header(AUTHENTICATE, credential.expose())
            .timeout(self.settings.request_timeout)
            .send()
            .await?;
        let projects: Vec<ProjectListEntry> = decode_json(check_response(resp).await?).await?;

        if options.filter_by_has_latest_edition {
            let filtered = filter_projects_with_latest_edition(&projects);
            tracing::debug!(
                total = projects.len(),
                kept = filtered.len(),
                "filtered project index"
            );
            return Ok(filtered);
        }
        Ok(projects)
    }
}
