//! VSDX input validation and package detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// The only extension accepted as input (lowercase, without the dot).
pub const VSDX_EXTENSION: &str = "vsdx";

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Validate an input path before any document I/O happens.
///
/// # Returns
/// * `Err(Error::NotFound)` if the path does not exist
/// * `Err(Error::UnsupportedFormat)` if the extension is not `.vsdx`
///   (case-insensitive)
///
/// # Example
/// ```no_run
/// use unvsdx::detect::validate_path;
///
/// validate_path("diagram.vsdx").unwrap();
/// ```
pub fn validate_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_default();

    if !extension.eq_ignore_ascii_case(VSDX_EXTENSION) {
        let suffix = if extension.is_empty() {
            String::new()
        } else {
            format!(".{}", extension)
        };
        return Err(Error::UnsupportedFormat(suffix));
    }

    Ok(())
}

/// Check if bytes start like an OPC package (a ZIP archive).
pub fn is_package_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

/// Check if a file is readable and looks like a ZIP-based package.
pub fn is_package<P: AsRef<Path>>(path: P) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut reader = BufReader::new(file);
    let mut header = [0u8; 4];
    reader.read_exact(&mut header).is_ok() && is_package_bytes(&header)
}
