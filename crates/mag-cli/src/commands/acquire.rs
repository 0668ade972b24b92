use std::path::Path;

use mag_store::{AcquireRequest, Acquisition};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AcquireArgs;
use crate::commands::store_failure;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::DownloadBar;

#[derive(Debug, Serialize, PartialEq, Eq)]
struct AcquireResponse {
    status: &'static str,
    target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    files: Option<usize>,
}

impl AcquireResponse {
    fn new(outcome: Acquisition, target: &Path) -> Self {
        let target = target.display().to_string();
        match outcome {
            Acquisition::AlreadyPresent => Self {
                status: "already_present",
                target,
                bytes: None,
                files: None,
            },
            Acquisition::Downloaded { bytes, files } => Self {
                status: "acquired",
                target,
                bytes: Some(bytes),
                files: Some(files),
            },
        }
    }
}

/// Handle `mag acquire`.
pub async fn handle(
    args: &AcquireArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let target = args.target.clone().unwrap_or_else(|| {
        ctx.config
            .storage
            .edition_dir(&args.domain, &args.edition_path)
    });

    let mut request = AcquireRequest::new(&target, &args.domain, &args.edition_path);
    if let Some(credential) = &ctx.credential {
        request = request.with_credential(credential.clone());
    }
    if let Some(charset) = &args.charset {
        request = request.with_charset(charset.clone());
    }

    let mut bar = DownloadBar::new(flags.shows_progress(), &args.edition_path);
    let result = ctx.store.acquire(&request, |progress| bar.update(progress)).await;

    let outcome = match result {
        Ok(outcome) => {
            bar.finish_clear();
            outcome
        }
        Err(error) => {
            bar.finish_err("failed");
            return Err(store_failure(
                error,
                &format!("failed to acquire {}{}", args.domain, args.edition_path),
            ));
        }
    };

    output(&AcquireResponse::new(outcome, &target), flags.format)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reports_download_counts() {
        let response = AcquireResponse::new(
            Acquisition::Downloaded {
                bytes: 2048,
                files: 3,
            },
            Path::new("/data/testproject/welcome"),
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({
                "status": "acquired",
                "target": "/data/testproject/welcome",
                "bytes": 2048,
                "files": 3,
            })
        );
    }

    #[test]
    fn present_bundle_omits_counts() {
        let response = AcquireResponse::new(Acquisition::AlreadyPresent, Path::new("/b"));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"status": "already_present", "target": "/b"})
        );
    }
}
