use mag_store::Released;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReleaseArgs;
use crate::commands::store_failure;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ReleaseResponse {
    status: &'static str,
    target: String,
}

/// Handle `mag release`.
pub async fn handle(
    args: &ReleaseArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let released = ctx.store.release(&args.target).await.map_err(|e| {
        store_failure(e, &format!("failed to release {}", args.target.display()))
    })?;

    let status = match released {
        Released::Removed => "released",
        Released::Absent => "absent",
    };
    output(
        &ReleaseResponse {
            status,
            target: args.target.display().to_string(),
        },
        flags.format,
    )
}
