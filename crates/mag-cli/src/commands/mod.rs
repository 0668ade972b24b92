use mag_client::ClientError;
use mag_store::StoreError;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

pub mod acquire;
pub mod project;
pub mod projects;
pub mod release;
pub mod serve;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: &Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Project(args) => project::handle(args, ctx, flags).await,
        Commands::Projects(args) => projects::handle(args, ctx, flags).await,
        Commands::Acquire(args) => acquire::handle(args, ctx, flags).await,
        Commands::Release(args) => release::handle(args, ctx, flags).await,
        Commands::Serve(args) => serve::handle(args, ctx, flags).await,
    }
}

/// Attach a human hint to a metadata call failure.
pub(crate) fn client_failure(error: ClientError, action: &str) -> anyhow::Error {
    let hint = if error.is_connectivity() {
        "no connection to the magazine service"
    } else if error.is_unauthorized() {
        "the API key was rejected"
    } else {
        "request failed"
    };
    anyhow::Error::new(error).context(format!("{action}: {hint}"))
}

pub(crate) fn store_failure(error: StoreError, action: &str) -> anyhow::Error {
    let hint = if error.is_connectivity() {
        "no connection to the magazine service"
    } else {
        "edition could not be stored"
    };
    anyhow::Error::new(error).context(format!("{action}: {hint}"))
}
