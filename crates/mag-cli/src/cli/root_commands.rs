use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch one project with its editions.
    Project(ProjectArgs),
    /// List the projects the API key can see.
    Projects(ProjectsArgs),
    /// Download and extract an edition for offline reading.
    Acquire(AcquireArgs),
    /// Remove a downloaded edition.
    Release(ReleaseArgs),
    /// Serve downloaded editions on a loopback port until Ctrl-C.
    Serve(ServeArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ProjectArgs {
    /// Project subdomain, e.g. `testproject`.
    pub domain: String,

    /// Order editions most recent first, then by title.
    #[arg(long)]
    pub sort: bool,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectsArgs {
    /// Only projects that have published an edition.
    #[arg(long)]
    pub with_latest_edition: bool,
}

#[derive(Clone, Debug, Args)]
pub struct AcquireArgs {
    pub domain: String,

    /// Edition path as listed by `mag project`, e.g. `/welcome`.
    pub edition_path: String,

    /// Bundle directory (default: `<storage.editions_dir>/<domain>/<edition>`).
    #[arg(long)]
    pub target: Option<PathBuf>,

    /// Charset of archive entry names (default: `storage.charset`).
    #[arg(long)]
    pub charset: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ReleaseArgs {
    /// Bundle directory to remove.
    pub target: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Directory to serve, usually `storage.editions_dir`.
    pub root: PathBuf,

    /// Bundle that must be present (default: the root itself).
    #[arg(long)]
    pub bundle: Option<PathBuf>,

    /// Loopback port; `0` picks a free one (default: `offline.port`).
    #[arg(long)]
    pub port: Option<u16>,
}
