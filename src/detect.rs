//! PDF header probe.
//!
//! Rejects non-PDF input with a clear error before the parser sees it.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Read the header of a file and return its PDF version string.
///
/// Fails with [`Error::UnknownFormat`] when the file does not start with
/// `%PDF-`, and with [`Error::UnsupportedVersion`] when the version after
/// the magic is not of the form `digit.digit`.
pub fn detect_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = [0u8; 16];
    let n = File::open(path)?.read(&mut header)?;
    detect_version_from_bytes(&header[..n])
}

/// Like [`detect_version_from_path`], over leading bytes already in memory.
pub fn detect_version_from_bytes(data: &[u8]) -> Result<String> {
    let version = data
        .strip_prefix(PDF_MAGIC)
        .and_then(|rest| rest.get(..3))
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version).to_string();

    let bytes = version.as_bytes();
    if bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit() {
        Ok(version)
    } else {
        Err(Error::UnsupportedVersion(version))
    }
}

/// True when the bytes start with a well-formed PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_version_from_bytes(data).is_ok()
}
