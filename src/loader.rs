//! Source loading: resolve an input locator into decoded risk-document text.
//!
//! Accepts either a compressed archive holding the risk file or the risk file
//! itself; a bare locator is retried with the archive suffix first, then the
//! raw suffix. Bytes are decoded as Latin-1, the single-byte encoding the
//! clearing house emits, so decoding never fails on stray bytes.

use crate::error::SpanError;
use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const ARCHIVE_EXT: &str = ".zip";
pub const RISK_FILE_EXT: &str = ".spn";

pub fn read_risk_text(path: &Path) -> Result<String, SpanError> {
    if has_suffix(path, ARCHIVE_EXT) {
        read_from_archive(path)
    } else if has_suffix(path, RISK_FILE_EXT) {
        read_raw(path)
    } else {
        // bare locator: archive form first, raw form second
        let archive = with_suffix(path, ARCHIVE_EXT);
        if archive.exists() {
            return read_from_archive(&archive);
        }
        let raw = with_suffix(path, RISK_FILE_EXT);
        if raw.exists() {
            return read_raw(&raw);
        }
        Err(SpanError::NotFound(format!(
            "{} (tried {ARCHIVE_EXT} and {RISK_FILE_EXT} suffixes)",
            path.display()
        )))
    }
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    path.to_string_lossy().to_ascii_lowercase().ends_with(suffix)
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut locator = path.as_os_str().to_os_string();
    locator.push(suffix);
    PathBuf::from(locator)
}

fn read_from_archive(path: &Path) -> Result<String, SpanError> {
    if !path.exists() {
        return Err(SpanError::NotFound(format!("archive {}", path.display())));
    }
    let file = File::open(path).map_err(|source| SpanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| SpanError::Archive {
        path: path.to_path_buf(),
        source,
    })?;

    // first entry with the risk-file suffix wins
    let entry_name = archive
        .file_names()
        .find(|name| name.to_ascii_lowercase().ends_with(RISK_FILE_EXT))
        .map(str::to_string)
        .ok_or_else(|| {
            SpanError::NotFound(format!(
                "no {RISK_FILE_EXT} entry inside {}",
                path.display()
            ))
        })?;

    let mut entry = archive.by_name(&entry_name).map_err(|source| SpanError::Archive {
        path: path.to_path_buf(),
        source,
    })?;
    let mut raw = Vec::new();
    entry.read_to_end(&mut raw).map_err(|source| SpanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_latin1(&raw))
}

fn read_raw(path: &Path) -> Result<String, SpanError> {
    let raw = fs::read(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => {
            SpanError::NotFound(format!("risk file {}", path.display()))
        }
        _ => SpanError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(decode_latin1(&raw))
}

// every byte maps to a code point, so legacy content can never abort a run
fn decode_latin1(raw: &[u8]) -> String {
    encoding_rs::mem::decode_latin1(raw).into_owned()
}
