use mag_client::RequestOptions;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ProjectArgs;
use crate::commands::client_failure;
use crate::context::AppContext;
use crate::output::output;

/// Handle `mag project`.
pub async fn handle(
    args: &ProjectArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let options = RequestOptions {
        credential: ctx.credential.clone(),
        sort: args.sort,
    };
    let project = ctx
        .client
        .get_project_and_editions(&args.domain, &options)
        .await
        .map_err(|e| client_failure(e, &format!("failed to fetch project '{}'", args.domain)))?;

    output(&project, flags.format)
}
