//! Rendering module for converting document records to output formats.

mod diagram;
mod json;
mod markdown;
mod options;

pub use diagram::{sanitize_node_id, to_mermaid, IMAGE_GLYPH, MAX_NODE_ID_LEN};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer};
pub use options::{FlowDirection, RenderOptions};
