//! Embedded image discovery.

use crate::model::{MediaIndex, MediaItem};
use crate::native::{attr, MediaCollection, NativePage, NativeShape, Probe};

use super::diagnostics::{Diagnostics, WarningScope};

/// Source tag for items found through a page's media collection.
pub const PAGE_MEDIA_SOURCE: &str = "page.media";

/// Source tag for items found through a page's images collection.
pub const PAGE_IMAGES_SOURCE: &str = "page.images";

/// Where a shape's image payload was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// The shape's own image data
    ImageData,
    /// The shape's image member
    Image,
    /// The shape's file reference
    File,
    /// The master's image data
    MasterImageData,
    /// The shape fill's image
    FillImage,
}

/// Find embedded image bytes on a shape.
///
/// Strategies are tried in a fixed order and the first non-empty payload
/// wins: image data, image, file, master image data, fill image.
pub fn probe_shape_image(shape: &dyn NativeShape) -> Option<(Vec<u8>, ImageSource)> {
    non_empty(shape.image_data())
        .map(|data| (data, ImageSource::ImageData))
        .or_else(|| non_empty(shape.image()).map(|data| (data, ImageSource::Image)))
        .or_else(|| non_empty(shape.file()).map(|data| (data, ImageSource::File)))
        .or_else(|| {
            attr(shape.master())
                .and_then(|master| non_empty(master.image_data()))
                .map(|data| (data, ImageSource::MasterImageData))
        })
        .or_else(|| {
            attr(shape.fill())
                .and_then(|fill| non_empty(fill.image()))
                .map(|data| (data, ImageSource::FillImage))
        })
}

fn non_empty(probe: Probe<Vec<u8>>) -> Option<Vec<u8>> {
    attr(probe).filter(|data| !data.is_empty())
}

/// Collect media attached directly to a page.
///
/// The media collection is probed before the images collection and both
/// may contribute. A failing probe is recorded and contributes nothing.
pub fn probe_page_media(page: &dyn NativePage, diag: &mut Diagnostics) -> Vec<MediaItem> {
    let mut items = Vec::new();

    for (source, probe) in [
        (PAGE_MEDIA_SOURCE, page.media()),
        (PAGE_IMAGES_SOURCE, page.images()),
    ] {
        match probe {
            Ok(Some(collection)) if !collection.is_empty() => {
                log::info!("Found {} attribute on page", source);
                items.extend(wrap_collection(collection, source));
            }
            Ok(_) => {}
            Err(e) => diag.warn(WarningScope::Media, source, e),
        }
    }

    items
}

fn wrap_collection(collection: MediaCollection, source: &str) -> Vec<MediaItem> {
    match collection {
        MediaCollection::Sequence(payloads) => payloads
            .into_iter()
            .enumerate()
            .map(|(idx, data)| MediaItem::new(MediaIndex::Position(idx), data, source))
            .collect(),
        MediaCollection::Keyed(entries) => entries
            .into_iter()
            .map(|(key, data)| MediaItem::new(MediaIndex::Key(key), data, source))
            .collect(),
    }
}
