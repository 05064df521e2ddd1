//! Page-level types.

use super::{Connection, MediaItem, ShapeRecord};
use serde::{Deserialize, Serialize};

/// Name given to pages whose reader reports no usable name.
pub const UNNAMED_PAGE: &str = "Unnamed Page";

/// A single diagram page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Page name
    pub name: String,

    /// Top-level shapes, including empty ones
    pub shapes: Vec<ShapeRecord>,

    /// Every top-level shape's connections, in shape order
    pub connections: Vec<Connection>,

    /// Page-level media count plus image-bearing top-level shapes
    pub images_count: usize,

    /// Images attached to the page itself
    pub page_media: Vec<MediaItem>,
}

impl PageRecord {
    /// Create a new empty page. An empty name becomes "Unnamed Page".
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: if name.is_empty() {
                UNNAMED_PAGE.to_string()
            } else {
                name
            },
            shapes: Vec::new(),
            connections: Vec::new(),
            images_count: 0,
            page_media: Vec::new(),
        }
    }

    /// Add page-level media, counting each item as an image.
    pub fn add_media(&mut self, media: Vec<MediaItem>) {
        self.images_count += media.len();
        self.page_media.extend(media);
    }

    /// Add a top-level shape, folding its connections and image flag into
    /// the page totals.
    pub fn add_shape(&mut self, shape: ShapeRecord) {
        self.connections.extend(shape.connections.iter().cloned());
        if shape.has_image {
            self.images_count += 1;
        }
        self.shapes.push(shape);
    }

    /// Check if the page has neither shapes nor page-level media.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty() && self.page_media.is_empty()
    }

    /// Get the number of top-level shapes.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }
}

impl Default for PageRecord {
    fn default() -> Self {
        Self::new(UNNAMED_PAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MediaIndex;

    #[test]
    fn test_empty_name_falls_back() {
        assert_eq!(PageRecord::new("").name, "Unnamed Page");
        assert_eq!(PageRecord::new("Overview").name, "Overview");
    }

    #[test]
    fn test_images_count_excludes_sub_shape_images() {
        let mut page = PageRecord::new("P");
        page.add_media(vec![MediaItem::new(
            MediaIndex::Position(0),
            vec![1],
            "page.media",
        )]);
        page.add_shape(ShapeRecord::new().with_id("1").with_image(true));
        page.add_shape(
            ShapeRecord::new()
                .with_id("2")
                .with_sub_shape(ShapeRecord::new().with_id("3").with_image(true)),
        );
        page.add_shape(ShapeRecord::new());

        assert_eq!(page.images_count, 2);
        assert_eq!(page.shape_count(), 3);
    }

    #[test]
    fn test_connections_are_flattened_in_order() {
        let mut page = PageRecord::new("P");
        page.add_shape(ShapeRecord::new().with_connection(Connection::new("1", "2")));
        page.add_shape(
            ShapeRecord::new()
                .with_connection(Connection::new("2", "3"))
                .with_connection(Connection::new("3", "4")),
        );

        assert_eq!(
            page.connections,
            vec![
                Connection::new("1", "2"),
                Connection::new("2", "3"),
                Connection::new("3", "4"),
            ]
        );
    }
}
