//! Page aggregation.

use crate::model::PageRecord;
use crate::native::{attr, NativePage};

use super::collection::collect_children;
use super::diagnostics::Diagnostics;
use super::media::probe_page_media;
use super::options::ExtractOptions;
use super::shape::normalize_shape;

/// Extract one page: its media and every top-level shape.
///
/// Top-level shapes are always kept, even when they carry no content.
pub fn extract_page(
    page: &dyn NativePage,
    options: &ExtractOptions,
    diag: &mut Diagnostics,
) -> PageRecord {
    let mut record = PageRecord::new(attr(page.name()).unwrap_or_default());

    let media = probe_page_media(page, diag);
    if !media.is_empty() {
        log::info!(
            "Found {} media items directly on page '{}'",
            media.len(),
            record.name
        );
        record.add_media(media);
    }

    let shapes = collect_children(page);
    log::info!(
        "Processing {} shapes on page '{}'",
        shapes.len(),
        record.name
    );

    for shape in shapes {
        let shape_record = normalize_shape(shape.as_ref(), 0, options, diag);
        if shape_record.has_image {
            log::info!("Image in shape found on page '{}'", record.name);
        }
        record.add_shape(shape_record);
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::testing::{MockConnect, MockPage, MockShape};
    use crate::model::Connection;
    use crate::native::MediaCollection;

    #[test]
    fn test_extract_page_data() {
        let page = MockPage {
            name: Some("Flow".into()),
            shapes: Some(vec![
                MockShape::with_id("1").text("Start"),
                MockShape {
                    connects: Some(vec![MockConnect::between("1", "3")]),
                    ..MockShape::with_id("2")
                },
                MockShape::with_id("3").text("End"),
            ]),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let record = extract_page(&page, &ExtractOptions::default(), &mut diag);

        assert_eq!(record.name, "Flow");
        assert_eq!(record.shapes.len(), 3);
        assert_eq!(record.connections, vec![Connection::new("1", "3")]);
        assert_eq!(record.images_count, 0);
    }

    #[test]
    fn test_unnamed_page_and_empty_shapes_kept() {
        let page = MockPage {
            name: Some(String::new()),
            shapes: Some(vec![MockShape::default(), MockShape::default()]),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let record = extract_page(&page, &ExtractOptions::default(), &mut diag);

        assert_eq!(record.name, "Unnamed Page");
        assert_eq!(record.shapes.len(), 2);
        assert!(!record.shapes[0].has_content());
    }

    #[test]
    fn test_images_count_combines_media_and_shapes() {
        let page = MockPage {
            shapes: Some(vec![
                MockShape {
                    image_data: Some(b"1".to_vec()),
                    ..MockShape::with_id("1")
                },
                MockShape {
                    shapes: Some(vec![MockShape {
                        image: Some(b"2".to_vec()),
                        ..MockShape::with_id("3")
                    }]),
                    ..MockShape::with_id("2")
                },
            ]),
            media: Some(MediaCollection::Sequence(vec![b"a".to_vec(), b"b".to_vec()])),
            ..Default::default()
        };
        let mut diag = Diagnostics::new();
        let record = extract_page(&page, &ExtractOptions::default(), &mut diag);

        assert_eq!(record.page_media.len(), 2);
        assert_eq!(record.images_count, 3);
    }
}
