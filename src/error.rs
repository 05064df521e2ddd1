//! Error types for unvsdx library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unvsdx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during diagram conversion.
///
/// Only failures that make the whole document untrustworthy surface here.
/// Problems with a single shape, page, or media probe are recovered during
/// extraction and reported as [`crate::extract::ExtractionWarning`]s instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input file has an extension other than `.vsdx`.
    #[error("Unsupported file format: {0}. Only .vsdx files are supported.")]
    UnsupportedFormat(String),

    /// The document reader failed while opening the package or listing pages.
    #[error("Error reading Visio file: {0}")]
    ReadFailure(String),

    /// Error during rendering (Markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ReadFailure(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::ReadFailure(format!("XML error: {}", err))
    }
}
