//! Shape-tree traversal and normalization.
//!
//! Drives any [`NativeDocument`] through page aggregation and shape
//! normalization and produces a canonical [`DocumentRecord`]. Only a failure
//! to enumerate pages aborts the run; every narrower failure is recovered
//! and reported as an [`ExtractionWarning`].

mod collection;
mod connection;
mod diagnostics;
mod media;
mod options;
mod page;
mod shape;

#[cfg(test)]
pub(crate) mod testing;

pub use collection::collect_children;
pub use connection::extract_connections;
pub use diagnostics::{Diagnostics, ExtractionWarning, WarningScope};
pub use media::{
    probe_page_media, probe_shape_image, ImageSource, PAGE_IMAGES_SOURCE, PAGE_MEDIA_SOURCE,
};
pub use options::{ExtractOptions, DEFAULT_MAX_DEPTH};
pub use page::extract_page;
pub use shape::normalize_shape;

use crate::error::{Error, Result};
use crate::model::{DocumentRecord, Metadata};
use crate::native::NativeDocument;

/// A document record together with the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// The canonical document
    pub document: DocumentRecord,
    /// Recovered failures, in the order they occurred
    pub warnings: Vec<ExtractionWarning>,
}

/// Extract a whole document.
///
/// # Errors
///
/// Returns [`Error::ReadFailure`] when the reader cannot enumerate pages.
/// No partial record is returned in that case.
pub fn extract_document(
    doc: &dyn NativeDocument,
    file_name: &str,
    options: &ExtractOptions,
) -> Result<Extraction> {
    let mut diag = Diagnostics::new();
    let mut record = DocumentRecord::new(file_name);

    match doc.properties() {
        Ok(Some(props)) => {
            record.metadata = Metadata {
                title: props.title,
                creator: props.creator,
                company: props.company,
            };
        }
        Ok(None) => {}
        Err(e) => diag.warn(WarningScope::Metadata, file_name, e),
    }

    let pages = doc.pages().map_err(|e| Error::ReadFailure(e.to_string()))?;

    for (idx, slot) in pages.into_iter().enumerate() {
        match slot {
            Ok(page) => {
                let page_record = extract_page(page.as_ref(), options, &mut diag);
                record.add_page(page_record);
            }
            Err(e) => diag.warn(WarningScope::Page, format!("#{}", idx + 1), e),
        }
    }

    log::info!(
        "Extracted {} pages with {} total images",
        record.page_count(),
        record.total_images
    );

    Ok(Extraction {
        document: record,
        warnings: diag.into_warnings(),
    })
}
