//! Project-index filtering.

use crate::entities::ProjectListEntry;

/// Keep the entries whose `latest_edition` is not the explicit `null` marker.
///
/// Order is preserved. Entries with a missing field or a falsy-looking value
/// (`0`, `false`, `""`) are kept.
#[must_use]
pub fn filter_projects_with_latest_edition(projects: &[ProjectListEntry]) -> Vec<ProjectListEntry> {
    projects
        .iter()
        .filter(|project| project.latest_edition.is_present())
        .cloned()
        .collect()
}
