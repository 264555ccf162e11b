// SPDX-License-Identifier: MPL-2.0
//! Magic-byte signature checks.
//!
//! The check reads a fixed-size prefix of the file and compares its lowercase
//! hexadecimal form against a set of known patterns.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Number of leading bytes compared for JPEG detection.
pub const JPEG_SIGNATURE_LEN: usize = 4;

/// JPEG start-of-image marker followed by a quantization table or an APPn marker.
pub const JPEG_SIGNATURES: &[&str] = &[
    "ffd8ffdb", "ffd8ffe0", "ffd8ffe1", "ffd8ffe2", "ffd8ffe3", "ffd8ffe8",
];

/// Returns whether the first `byte_count` bytes of `path` match one of `patterns`.
///
/// Patterns are compared case-insensitively. A file shorter than `byte_count`
/// is reported as an I/O error rather than a mismatch.
pub fn matches_signature<P: AsRef<Path>>(
    path: P,
    patterns: &[&str],
    byte_count: usize,
) -> Result<bool> {
    let path = path.as_ref();
    let mut file = File::open(path).map_err(|e| Error::io(path, e))?;

    let mut buffer = vec![0u8; byte_count];
    file.read_exact(&mut buffer)
        .map_err(|e| Error::io(path, e))?;

    let header = hex::encode(&buffer);
    Ok(patterns
        .iter()
        .any(|pattern| pattern.eq_ignore_ascii_case(&header)))
}

/// Shorthand for the JPEG signature set.
pub fn is_jpeg<P: AsRef<Path>>(path: P) -> Result<bool> {
    matches_signature(path, JPEG_SIGNATURES, JPEG_SIGNATURE_LEN)
}
