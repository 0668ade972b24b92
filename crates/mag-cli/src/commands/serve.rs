use anyhow::Context;
use mag_offline::{ServeOptions, serve_edition_offline};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ServeArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ServeResponse {
    url: String,
    root: String,
}

/// Handle `mag serve`. Blocks until Ctrl-C.
pub async fn handle(args: &ServeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let bundle = args.bundle.clone().unwrap_or_else(|| args.root.clone());
    let mut options = ServeOptions::from_config(&ctx.config.offline);
    if let Some(port) = args.port {
        options = options.with_port(port);
    }

    let server = serve_edition_offline(&args.root, &bundle, &options)
        .await
        .with_context(|| format!("failed to serve {}", args.root.display()))?;

    output(
        &ServeResponse {
            url: server.url_for(&bundle).unwrap_or_else(|| server.url()),
            root: args.root.display().to_string(),
        },
        flags.format,
    )?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    server.shutdown();
    Ok(())
}
