use std::future::Future;

use mag_client::{ClientError, MetadataClient};
use mag_core::Credential;

/// Where edition archives come from.
///
/// Implementations return the response with its body unread; the store
/// streams it to disk.
pub trait ArchiveSource: Send + Sync {
    fn fetch_archive(
        &self,
        project_domain: &str,
        edition_path: &str,
        credential: Option<&Credential>,
    ) -> impl Future<Output = Result<reqwest::Response, ClientError>> + Send;
}

impl ArchiveSource for MetadataClient {
    fn fetch_archive(
        &self,
        project_domain: &str,
        edition_path: &str,
        credential: Option<&Credential>,
    ) -> impl Future<Output = Result<reqwest::Response, ClientError>> + Send {
        self.fetch_edition_archive(project_domain, edition_path, credential)
    }
}
