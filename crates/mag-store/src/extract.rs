//! Zip extraction with caller-selected entry name encoding.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

use encoding_rs::Encoding;

use crate::error::ExtractError;

/// How archive entry names are turned into file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryNameEncoding {
    Utf8,
    /// The zip format's legacy default: CP437 unless the entry is flagged UTF-8.
    ZipDefault,
    Other(&'static Encoding),
}

impl EntryNameEncoding {
    /// Resolve a charset label such as `UTF-8`, `windows-1252`, or `cp437`.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::UnsupportedCharset`] for unknown labels.
    pub fn for_label(label: &str) -> Result<Self, ExtractError> {
        let normalized = label.trim().to_ascii_lowercase();
        if matches!(normalized.as_str(), "cp437" | "ibm437" | "437") {
            return Ok(Self::ZipDefault);
        }
        match Encoding::for_label(normalized.as_bytes()) {
            Some(encoding) if encoding == encoding_rs::UTF_8 => Ok(Self::Utf8),
            Some(encoding) => Ok(Self::Other(encoding)),
            None => Err(ExtractError::UnsupportedCharset(label.to_string())),
        }
    }

    /// Entries flagged UTF-8 keep the zip crate's decoding; the selected
    /// charset only applies to unflagged legacy names.
    fn decode(self, raw: &[u8], zip_decoded: &str) -> String {
        if !raw.is_ascii() && zip_decoded.as_bytes() == raw {
            return zip_decoded.to_string();
        }
        match self {
            Self::Utf8 => String::from_utf8_lossy(raw).into_owned(),
            Self::ZipDefault => zip_decoded.to_string(),
            Self::Other(encoding) => encoding.decode_without_bom_handling(raw).0.into_owned(),
        }
    }
}

/// Unpack `archive` into `target`. Returns the number of files written.
///
/// Blocking; run it on a blocking thread.
pub(crate) fn extract_archive(
    archive: &Path,
    target: &Path,
    encoding: EntryNameEncoding,
) -> Result<usize, ExtractError> {
    let mut zip = zip::ZipArchive::new(BufReader::new(File::open(archive)?))?;
    if zip.is_empty() {
        return Err(ExtractError::Empty);
    }

    let mut files = 0;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let name = encoding.decode(entry.name_raw(), entry.name());
        let relative = enclosed_path(&name).ok_or_else(|| ExtractError::UnsafeEntry(name.clone()))?;
        if relative.as_os_str().is_empty() {
            continue;
        }

        let out = target.join(&relative);
        if entry.is_dir() {
            fs::create_dir_all(&out)?;
            continue;
        }
        if let Some(parent) = out.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut dest = File::create(&out)?;
        io::copy(&mut entry, &mut dest)?;
        files += 1;
    }
    Ok(files)
}

/// Relative path for an entry name, or `None` if it would land outside the
/// bundle directory. Backslashes count as separators.
fn enclosed_path(name: &str) -> Option<PathBuf> {
    let normalized = name.replace('\\', "/");
    let mut path = PathBuf::new();
    for component in Path::new(&normalized).components() {
        match component {
            Component::Normal(part) => path.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("UTF-8", EntryNameEncoding::Utf8)]
    #[case("utf8", EntryNameEncoding::Utf8)]
    #[case(" CP437 ", EntryNameEncoding::ZipDefault)]
    #[case("IBM437", EntryNameEncoding::ZipDefault)]
    #[case("windows-1252", EntryNameEncoding::Other(encoding_rs::WINDOWS_1252))]
    #[case("latin1", EntryNameEncoding::Other(encoding_rs::WINDOWS_1252))]
    #[case("Shift_JIS", EntryNameEncoding::Other(encoding_rs::SHIFT_JIS))]
    fn resolves_charset_labels(#[case] label: &str, #[case] expected: EntryNameEncoding) {
        assert_eq!(EntryNameEncoding::for_label(label).unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_charset() {
        let err = EntryNameEncoding::for_label("klingon").unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedCharset(ref l) if l == "klingon"));
    }

    #[test]
    fn decodes_legacy_names_with_selected_charset() {
        let raw = b"caf\xe9/index.html";
        let encoding = EntryNameEncoding::for_label("windows-1252").unwrap();
        assert_eq!(encoding.decode(raw, "ignored"), "café/index.html");

        let utf8 = EntryNameEncoding::Utf8;
        assert_eq!(utf8.decode("café".as_bytes(), "ignored"), "café");
        assert_eq!(EntryNameEncoding::ZipDefault.decode(raw, "from-zip"), "from-zip");
    }

    #[test]
    fn utf8_flagged_names_ignore_selected_charset() {
        let name = "café/index.html";
        let encoding = EntryNameEncoding::for_label("windows-1252").unwrap();
        assert_eq!(encoding.decode(name.as_bytes(), name), name);
        assert_eq!(EntryNameEncoding::ZipDefault.decode(name.as_bytes(), name), name);
    }

    #[rstest]
    #[case("index.html", Some("index.html"))]
    #[case("./assets/app.js", Some("assets/app.js"))]
    #[case("assets\\img\\cover.jpg", Some("assets/img/cover.jpg"))]
    #[case("assets/", Some("assets"))]
    #[case("./", Some(""))]
    #[case("../evil.sh", None)]
    #[case("assets/../../evil.sh", None)]
    #[case("/etc/passwd", None)]
    fn entry_paths_stay_inside_bundle(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(enclosed_path(name), expected.map(PathBuf::from));
    }
}
