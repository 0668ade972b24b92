//! Static file responses.

use std::fs::File;
use std::path::{Path, PathBuf};

use tiny_http::{Header, Method, Request, Response};
use tracing::debug;

pub(crate) fn respond(root: &Path, request: Request) {
    let method = request.method().clone();
    let url = request.url().to_string();

    let (status, result) = match method {
        Method::Get | Method::Head => match resolve(root, &url).and_then(open) {
            Some((path, file)) => {
                let mut response = Response::from_file(file);
                if let Some(header) = header("Content-Type", content_type(&path)) {
                    response.add_header(header);
                }
                (200, request.respond(response))
            }
            None => (404, request.respond(Response::from_string("Not Found").with_status_code(404))),
        },
        _ => {
            let mut response = Response::from_string("Method Not Allowed").with_status_code(405);
            if let Some(header) = header("Allow", "GET, HEAD") {
                response.add_header(header);
            }
            (405, request.respond(response))
        }
    };

    debug!(%method, %url, status, "offline request");
    if let Err(error) = result {
        debug!(%error, %url, "client went away before the response was sent");
    }
}

/// Map a request URL to a file under `root`.
///
/// Drops the query and fragment, percent-decodes, and refuses any `..`
/// segment. Directories resolve to their `index.html`.
pub(crate) fn resolve(root: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let decoded = urlencoding::decode(path).ok()?;

    let mut resolved = root.to_path_buf();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => return None,
            s if s.contains(['\\', '\0']) => return None,
            s => resolved.push(s),
        }
    }
    if resolved.is_dir() {
        resolved.push("index.html");
    }
    resolved.is_file().then_some(resolved)
}

fn open(path: PathBuf) -> Option<(PathBuf, File)> {
    let file = File::open(&path).ok()?;
    Some((path, file))
}

fn header(name: &str, value: &str) -> Option<Header> {
    Header::from_bytes(name.as_bytes(), value.as_bytes()).ok()
}

pub(crate) fn content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "xml" => "application/xml",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
