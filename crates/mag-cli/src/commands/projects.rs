use mag_client::ListOptions;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProjectsArgs;
use crate::commands::client_failure;
use crate::context::AppContext;
use crate::output::output;

/// Handle `mag projects`.
pub async fn handle(
    args: &ProjectsArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let options = ListOptions {
        credential: ctx.credential.clone(),
        filter_by_has_latest_edition: args.with_latest_edition,
    };
    let projects = ctx
        .client
        .get_projects_list(&options)
        .await
        .map_err(|e| client_failure(e, "failed to list projects"))?;

    tracing::debug!(count = projects.len(), "projects listed");
    output(&projects, flags.format)
}
