//! One-call conversion of `.vsdx` files.
//!
//! Validates the input path, opens the package, extracts the canonical
//! record and renders it in the requested format.
//!
//! # Example
//!
//! ```no_run
//! use unvsdx::convert::{convert_file, ConvertOptions, ConvertOutput, OutputFormat};
//!
//! fn main() -> unvsdx::Result<()> {
//!     let options = ConvertOptions::new().with_format(OutputFormat::Both);
//!     if let ConvertOutput::Both { markdown, document } = convert_file("flow.vsdx", &options)? {
//!         println!("{}", markdown);
//!         println!("{} pages", document.page_count());
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::detect::validate_path;
use crate::error::{Error, Result};
use crate::extract::{extract_document, ExtractOptions, Extraction};
use crate::model::DocumentRecord;
use crate::render::{to_markdown, RenderOptions};
use crate::vsdx::VsdxPackage;

/// Output format for conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markdown report
    #[default]
    Markdown,

    /// Structured record
    Json,

    /// Report and record together
    Both,
}

impl OutputFormat {
    /// Lowercase name of the format.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
            OutputFormat::Both => "both",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    /// Parse a format name, ignoring case.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            "both" => Ok(OutputFormat::Both),
            other => Err(Error::Other(format!("Unknown output format: {}", other))),
        }
    }
}

/// Options for document conversion.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Extraction options
    pub extract: ExtractOptions,

    /// Rendering options
    pub render: RenderOptions,

    /// Output format
    pub output_format: OutputFormat,
}

impl ConvertOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set extraction options.
    pub fn with_extract_options(mut self, options: ExtractOptions) -> Self {
        self.extract = options;
        self
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}

/// Result of a conversion, shaped by the requested [`OutputFormat`].
#[derive(Debug, Clone, PartialEq)]
pub enum ConvertOutput {
    /// Markdown report
    Markdown(String),

    /// Structured record
    Json(DocumentRecord),

    /// Report and record together
    Both {
        /// Markdown report
        markdown: String,
        /// Structured record
        document: DocumentRecord,
    },
}

impl ConvertOutput {
    /// The Markdown report, if one was requested.
    pub fn markdown(&self) -> Option<&str> {
        match self {
            ConvertOutput::Markdown(markdown) | ConvertOutput::Both { markdown, .. } => {
                Some(markdown)
            }
            ConvertOutput::Json(_) => None,
        }
    }

    /// The structured record, if one was requested.
    pub fn document(&self) -> Option<&DocumentRecord> {
        match self {
            ConvertOutput::Json(document) | ConvertOutput::Both { document, .. } => Some(document),
            ConvertOutput::Markdown(_) => None,
        }
    }
}

/// Validate, open and extract a `.vsdx` file.
///
/// # Errors
///
/// * [`Error::NotFound`] if the path does not exist
/// * [`Error::UnsupportedFormat`] if the extension is not `.vsdx`
/// * [`Error::ReadFailure`] if the package cannot be opened or has no pages
pub fn extract_file<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> Result<Extraction> {
    let path = path.as_ref();
    validate_path(path)?;

    log::info!("Opening Visio file: {}", path.display());
    let package = VsdxPackage::open(path).map_err(|e| match e {
        Error::Io(io) => Error::ReadFailure(io.to_string()),
        other => other,
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    extract_document(&package, &file_name, options)
}

/// Extract a `.vsdx` package held in memory.
///
/// `file_name` is only used for the record and the report header.
pub fn extract_bytes(data: &[u8], file_name: &str, options: &ExtractOptions) -> Result<Extraction> {
    let package = VsdxPackage::from_bytes(data)?;
    extract_document(&package, file_name, options)
}

/// Convert a `.vsdx` file.
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<ConvertOutput> {
    let extraction = extract_file(path, &options.extract)?;
    Ok(shape_output(extraction.document, options))
}

/// Convert a `.vsdx` package held in memory.
pub fn convert_bytes(
    data: &[u8],
    file_name: &str,
    options: &ConvertOptions,
) -> Result<ConvertOutput> {
    let extraction = extract_bytes(data, file_name, &options.extract)?;
    Ok(shape_output(extraction.document, options))
}

fn shape_output(document: DocumentRecord, options: &ConvertOptions) -> ConvertOutput {
    match options.output_format {
        OutputFormat::Markdown => ConvertOutput::Markdown(to_markdown(&document, &options.render)),
        OutputFormat::Json => ConvertOutput::Json(document),
        OutputFormat::Both => ConvertOutput::Both {
            markdown: to_markdown(&document, &options.render),
            document,
        },
    }
}
