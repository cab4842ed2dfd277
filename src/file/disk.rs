//! Read-only access to the real filesystem.
//!
//! The host never writes to disk: compiler output is captured in memory.

use std::fs;
use std::io;
use std::path::Path;

use crate::diagnostic::{HostError, HostResult};

/// Check whether a regular file exists at `path`.
pub fn file_exists(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|m| m.is_file())
}

/// Read a UTF-8 file from disk.
///
/// Missing files and directories map to [`HostError::FileNotFound`]; any
/// other IO failure is reported as [`HostError::Io`].
pub fn read_file(path: &Path) -> HostResult<String> {
    let not_found = || HostError::not_found(path.to_string_lossy());
    let map_err = |source: io::Error| match source.kind() {
        io::ErrorKind::NotFound => not_found(),
        _ => HostError::Io {
            path: path.to_path_buf(),
            source,
        },
    };

    let meta = fs::metadata(path).map_err(map_err)?;
    if meta.is_dir() {
        return Err(not_found());
    }
    let bytes = fs::read(path).map_err(map_err)?;
    decode_utf8(bytes).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Names of the subdirectories of `path`, sorted.
///
/// An unreadable or missing directory lists as empty.
pub fn subdirectories(path: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(path) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_dir()))
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort_unstable();
    names
}

/// Decode bytes as UTF-8, stripping BOM if present.
fn decode_utf8(mut bytes: Vec<u8>) -> io::Result<String> {
    if bytes.starts_with(b"\xef\xbb\xbf") {
        bytes.drain(..3);
    }
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
