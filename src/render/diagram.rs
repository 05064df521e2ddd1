//! Mermaid flowchart rendering for a single page.
//!
//! Every page becomes one fenced `mermaid` block: page-level media nodes
//! first, then one node per labelled shape, then either the page's explicit
//! connections or, when there are none, edges inferred from stage keywords
//! in the shape text.

use std::collections::{HashMap, HashSet};

use crate::model::{PageRecord, ShapeRecord};

use super::RenderOptions;

/// Glyph appended to labels of image-bearing nodes.
pub const IMAGE_GLYPH: &str = "📷";

/// Maximum length of a node identifier, in characters.
pub const MAX_NODE_ID_LEN: usize = 50;

const FENCE_OPEN: &str = "```mermaid";
const FENCE_CLOSE: &str = "```";

/// Build a node identifier from shape text.
///
/// Every non-alphanumeric character becomes `_` and the result is cut to
/// [`MAX_NODE_ID_LEN`] characters. Empty text falls back to `shape_<id>`,
/// or to `unknown` when there is no usable id either.
pub fn sanitize_node_id(text: &str, id: Option<&str>) -> String {
    if !text.is_empty() {
        return text
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .take(MAX_NODE_ID_LEN)
            .collect();
    }
    match id.filter(|id| !id.is_empty()) {
        Some(id) => format!("shape_{}", id),
        None => "unknown".to_string(),
    }
}

/// Render one page as a fenced Mermaid block.
pub fn to_mermaid(page: &PageRecord, options: &RenderOptions) -> String {
    let mut lines = vec![
        FENCE_OPEN.to_string(),
        format!("graph {}", options.direction),
    ];

    for idx in 0..page.page_media.len() {
        lines.push(format!(
            "    page_image_{}[\"{} Page Image {}\"]",
            idx,
            IMAGE_GLYPH,
            idx + 1
        ));
    }

    let mut added = HashSet::new();
    for shape in &page.shapes {
        let label = shape.label();
        let Some(id) = shape.id_string() else {
            continue;
        };
        if label.is_empty() {
            continue;
        }

        let node_id = sanitize_node_id(&label, Some(&id));
        if !added.insert(node_id.clone()) {
            continue;
        }
        let mut display = label.replace('"', "'");
        if shape.has_image {
            display.push(' ');
            display.push_str(IMAGE_GLYPH);
        }
        lines.push(format!("    {}[\"{}\"]", node_id, display));
    }

    lines.push(String::new());
    if page.connections.is_empty() {
        lines.push("    %% Hierarchical structure (inferred)".to_string());
        lines.extend(inferred_edges(&page.shapes));
    } else {
        lines.push("    %% Connections".to_string());
        let labels = node_labels(&page.shapes);
        for conn in &page.connections {
            if let (Some(from), Some(to)) = (labels.get(&conn.from), labels.get(&conn.to)) {
                lines.push(format!(
                    "    {} --> {}",
                    sanitize_node_id(from, Some(&conn.from)),
                    sanitize_node_id(to, Some(&conn.to))
                ));
            }
        }
    }

    lines.push(FENCE_CLOSE.to_string());
    lines.join("\n")
}

/// Labels of every shape an edge may point at, keyed by identifier.
///
/// Sub-shapes with text are keyed `<parent id>_<text>`.
fn node_labels(shapes: &[ShapeRecord]) -> HashMap<String, String> {
    let mut labels = HashMap::new();

    for shape in shapes {
        if let Some(id) = shape.id_string() {
            let label = shape.label();
            if !label.is_empty() {
                labels.insert(id, label);
            }
        }

        let parent = shape.id.as_ref().map(ToString::to_string).unwrap_or_default();
        for sub in shape.sub_shapes.iter().filter(|s| !s.text.is_empty()) {
            labels.insert(format!("{}_{}", parent, sub.text), sub.text.clone());
        }
    }

    labels
}

/// Pipeline stage suggested by a shape's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Setup,
    Staging,
    Finalization,
}

impl Stage {
    fn classify(text: &str) -> Option<Self> {
        let text = text.to_lowercase();
        if text.contains("setup") || text.starts_with('0') || text.starts_with('1') {
            Some(Stage::Setup)
        } else if text.contains("staging") || text.starts_with('2') {
            Some(Stage::Staging)
        } else if text.contains("finalization") || text.starts_with('3') {
            Some(Stage::Finalization)
        } else {
            None
        }
    }
}

/// Edges linking the first shape of each stage to the first of the next.
fn inferred_edges(shapes: &[ShapeRecord]) -> Vec<String> {
    let first = |stage: Stage| {
        shapes
            .iter()
            .find(|shape| Stage::classify(&shape.text) == Some(stage))
    };
    let setup = first(Stage::Setup);
    let staging = first(Stage::Staging);
    let finalization = first(Stage::Finalization);

    [(setup, staging), (staging, finalization)]
        .into_iter()
        .filter_map(|pair| match pair {
            (Some(from), Some(to)) if !from.text.is_empty() && !to.text.is_empty() => Some(
                format!("    {} --> {}", edge_node(from), edge_node(to)),
            ),
            _ => None,
        })
        .collect()
}

fn edge_node(shape: &ShapeRecord) -> String {
    let id = shape.id.as_ref().map(ToString::to_string);
    sanitize_node_id(&shape.text, id.as_deref())
}
