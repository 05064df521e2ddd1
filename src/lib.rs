//! # unvsdx
//!
//! Visio diagram extraction library for Rust.
//!
//! This library reads `.vsdx` drawings, normalizes their pages, shapes,
//! connections and embedded images into a canonical record, and renders
//! that record as a Markdown report with Mermaid flowcharts or as JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unvsdx::{parse_file, render};
//!
//! fn main() -> unvsdx::Result<()> {
//!     // Parse a Visio file
//!     let doc = parse_file("diagram.vsdx")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options);
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two output formats**: Markdown report and JSON record
//! - **Mermaid diagrams**: one flowchart per page, built from connectors
//! - **Image discovery**: shape images and page-level media
//! - **Reader independence**: extraction runs over the [`native`] traits,
//!   so other document readers can be plugged in

pub mod convert;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod native;
pub mod render;
pub mod vsdx;

// Re-export commonly used types
pub use convert::{convert_file, ConvertOptions, ConvertOutput, OutputFormat};
pub use detect::{is_package, validate_path};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, Extraction, ExtractionWarning, WarningScope};
pub use model::{
    Connection, DocumentRecord, MediaIndex, MediaItem, Metadata, PageRecord, ShapeId, ShapeRecord,
};
pub use render::{FlowDirection, JsonFormat, RenderOptions};
pub use vsdx::VsdxPackage;

use std::path::Path;

/// Parse a Visio file and return its canonical record.
///
/// Recovered problems (unreadable pages, failing probes) are logged and
/// dropped; use [`Unvsdx`] to receive them as values.
///
/// # Example
///
/// ```no_run
/// use unvsdx::parse_file;
///
/// let doc = parse_file("diagram.vsdx").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<DocumentRecord> {
    let extraction = convert::extract_file(path, &ExtractOptions::default())?;
    Ok(extraction.document)
}

/// Parse a Visio package from bytes.
pub fn parse_bytes(data: &[u8], file_name: &str) -> Result<DocumentRecord> {
    let extraction = convert::extract_bytes(data, file_name, &ExtractOptions::default())?;
    Ok(extraction.document)
}

/// Convert a Visio file to a Markdown report.
///
/// # Example
///
/// ```no_run
/// use unvsdx::to_markdown;
///
/// let markdown = to_markdown("diagram.vsdx").unwrap();
/// std::fs::write("diagram.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(render::to_markdown(&doc, &RenderOptions::default()))
}

/// Convert a Visio file to JSON.
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting Visio documents.
///
/// # Example
///
/// ```no_run
/// use unvsdx::{FlowDirection, Unvsdx};
///
/// let markdown = Unvsdx::new()
///     .with_max_depth(3)
///     .with_direction(FlowDirection::LeftRight)
///     .parse("diagram.vsdx")?
///     .to_markdown();
/// # Ok::<(), unvsdx::Error>(())
/// ```
pub struct Unvsdx {
    extract_options: ExtractOptions,
    render_options: RenderOptions,
}

impl Unvsdx {
    /// Create a new Unvsdx builder.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Set how deep nested shapes are followed.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.extract_options = self.extract_options.with_max_depth(depth);
        self
    }

    /// Set the diagram direction.
    pub fn with_direction(mut self, direction: FlowDirection) -> Self {
        self.render_options = self.render_options.with_direction(direction);
        self
    }

    /// Set the JSON layout.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.render_options = self.render_options.with_json_format(format);
        self
    }

    /// Parse a Visio file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnvsdxResult> {
        let extraction = convert::extract_file(path, &self.extract_options)?;
        Ok(UnvsdxResult::new(extraction, self.render_options))
    }

    /// Parse a Visio package from bytes.
    pub fn parse_bytes(self, data: &[u8], file_name: &str) -> Result<UnvsdxResult> {
        let extraction = convert::extract_bytes(data, file_name, &self.extract_options)?;
        Ok(UnvsdxResult::new(extraction, self.render_options))
    }
}

impl Default for Unvsdx {
    fn default() -> Self {
        Self::new()
    }
}

/// Result wrapper providing convenient output methods.
pub struct UnvsdxResult {
    /// The extracted document
    pub document: DocumentRecord,
    /// Problems recovered during extraction
    pub warnings: Vec<ExtractionWarning>,
    render_options: RenderOptions,
}

impl UnvsdxResult {
    fn new(extraction: Extraction, render_options: RenderOptions) -> Self {
        Self {
            document: extraction.document,
            warnings: extraction.warnings,
            render_options,
        }
    }

    /// Convert to the Markdown report.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self) -> Result<String> {
        render::to_json(&self.document, self.render_options.json_format)
    }

    /// Render one page as a Mermaid block (1-indexed).
    pub fn page_diagram(&self, page_num: usize) -> Option<String> {
        self.document
            .get_page(page_num)
            .map(|page| render::to_mermaid(page, &self.render_options))
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.document.page_count()
    }

    /// Check whether extraction recovered from any problem.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
