//! Shape normalization.

use crate::model::{ShapeId, ShapeRecord};
use crate::native::{attr, attr_or, NativeShape};

use super::collection::collect_children;
use super::connection::extract_connections;
use super::diagnostics::Diagnostics;
use super::media::probe_shape_image;
use super::options::ExtractOptions;

/// Convert one native shape, and its descendants down to
/// `options.max_depth`, into a canonical record.
///
/// Every field is probed independently; an absent or failing member leaves
/// that field at its empty value. Children without observable content are
/// pruned. At the depth bound the record has no sub-shapes, whatever the
/// native graph holds, which also terminates cyclic graphs.
pub fn normalize_shape(
    shape: &dyn NativeShape,
    depth: usize,
    options: &ExtractOptions,
    diag: &mut Diagnostics,
) -> ShapeRecord {
    let mut record = ShapeRecord {
        text: attr_or(shape.text(), String::new()).trim().to_string(),
        name: attr_or(shape.name(), String::new()),
        id: shape_id(shape),
        shape_type: attr(shape.master())
            .and_then(|master| attr(master.name()))
            .unwrap_or_default(),
        ..Default::default()
    };

    record.connections = extract_connections(shape, diag);

    if let Some((data, source)) = probe_shape_image(shape) {
        record.has_image = true;
        log::info!(
            "Image found in shape ID: {}, text: '{}' ({:?}, {} bytes)",
            display_id(&record),
            record.text,
            source,
            data.len()
        );
    }

    if depth < options.max_depth {
        for child in collect_children(shape) {
            let sub = normalize_shape(child.as_ref(), depth + 1, options, diag);
            if sub.has_content() {
                record.sub_shapes.push(sub);
            }
        }
    } else {
        log::debug!(
            "Depth limit {} reached at shape {}",
            options.max_depth,
            display_id(&record)
        );
    }

    record
}

/// Primary identifier, falling back to the legacy one when the primary is
/// absent or empty.
fn shape_id(shape: &dyn NativeShape) -> Option<ShapeId> {
    attr(shape.id())
        .filter(ShapeId::is_present)
        .or_else(|| attr(shape.legacy_id()).filter(ShapeId::is_present))
}

fn display_id(record: &ShapeRecord) -> String {
    record
        .id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "<no id>".to_string())
}
