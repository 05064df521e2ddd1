//! Document-level types.

use super::PageRecord;
use serde::{Deserialize, Serialize};

/// A converted Visio document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Input file name (without directories)
    pub file_name: String,

    /// Pages in document order
    pub pages: Vec<PageRecord>,

    /// Document properties
    pub metadata: Metadata,

    /// Sum of every page's `images_count`
    pub total_images: usize,
}

impl DocumentRecord {
    /// Create a new empty document.
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Default::default()
        }
    }

    /// Add a page, folding its image count into the total.
    pub fn add_page(&mut self, page: PageRecord) {
        self.total_images += page.images_count;
        self.pages.push(page);
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: usize) -> Option<&PageRecord> {
        if page_num == 0 {
            return None;
        }
        self.pages.get(page_num - 1)
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document creator
    pub creator: Option<String>,

    /// Company
    pub company: Option<String>,
}

impl Metadata {
    /// Labelled fields in report order, skipping absent and empty values.
    pub fn present_fields(&self) -> Vec<(&'static str, &str)> {
        [
            ("Title", &self.title),
            ("Creator", &self.creator),
            ("Company", &self.company),
        ]
        .into_iter()
        .filter_map(|(label, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (label, v))
        })
        .collect()
    }

    /// Check if every field is absent or empty.
    pub fn is_empty(&self) -> bool {
        self.present_fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_images_sums_pages() {
        let mut doc = DocumentRecord::new("test.vsdx");
        let mut page = PageRecord::new("One");
        page.images_count = 2;
        doc.add_page(page);
        let mut page = PageRecord::new("Two");
        page.images_count = 3;
        doc.add_page(page);

        assert_eq!(doc.total_images, 5);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.get_page(2).unwrap().name, "Two");
        assert!(doc.get_page(0).is_none());
    }

    #[test]
    fn test_metadata_present_fields() {
        let metadata = Metadata {
            title: Some("Flow".into()),
            creator: Some(String::new()),
            company: Some("Acme".into()),
        };
        assert_eq!(
            metadata.present_fields(),
            vec![("Title", "Flow"), ("Company", "Acme")]
        );
        assert!(!metadata.is_empty());
        assert!(Metadata::default().is_empty());
    }

    #[test]
    fn test_metadata_serializes_absent_as_null() {
        let json = serde_json::to_value(Metadata::default()).unwrap();
        assert!(json["title"].is_null());
        assert!(json["creator"].is_null());
        assert!(json["company"].is_null());
    }
}
