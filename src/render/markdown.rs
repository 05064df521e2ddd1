//! Markdown report rendering for converted diagrams.

use crate::model::{DocumentRecord, MediaItem, PageRecord, ShapeRecord};

use super::diagram::{to_mermaid, IMAGE_GLYPH};
use super::RenderOptions;

const CHECK_GLYPH: &str = "✅";

/// Convert a document record to a Markdown report.
pub fn to_markdown(doc: &DocumentRecord, options: &RenderOptions) -> String {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Markdown report renderer.
///
/// The report is a flat list of lines joined with `\n`; entries that end in
/// `\n` leave a blank line behind them.
pub struct MarkdownRenderer {
    options: RenderOptions,
    lines: Vec<String>,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
        }
    }

    /// Render a document to Markdown.
    pub fn render(mut self, doc: &DocumentRecord) -> String {
        self.push(format!("# {}\n", doc.file_name));

        let fields = doc.metadata.present_fields();
        if !fields.is_empty() {
            self.push("## Metadata\n");
            for (label, value) in fields {
                self.push(format!("- **{}**: {}", label, value));
            }
            self.push("");
        }

        self.push(format!("**Total Images Found**: {}\n", doc.total_images));
        self.push(format!("## Pages ({} total)\n", doc.page_count()));

        for (idx, page) in doc.pages.iter().enumerate() {
            self.render_page(idx + 1, page);
        }

        self.lines.join("\n")
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn render_page(&mut self, number: usize, page: &PageRecord) {
        self.push(format!("### Page {}: {}\n", number, page.name));

        if page.images_count > 0 {
            self.push(format!(
                "**Images found on this page**: {}\n",
                page.images_count
            ));
        }

        if !page.page_media.is_empty() {
            self.render_page_media(&page.page_media);
        }

        if !page.is_empty() {
            self.push("#### Diagram\n");
            let diagram = to_mermaid(page, &self.options);
            self.push(diagram);
            self.push("");
        }

        if !page.connections.is_empty() {
            self.push(format!(
                "#### Connections ({} total)\n",
                page.connections.len()
            ));
            for conn in &page.connections {
                self.push(format!("- Shape {} → Shape {}", conn.from, conn.to));
            }
            self.push("");
        }

        if page.shapes.is_empty() {
            self.push("*No shapes found on this page*\n");
            return;
        }

        self.push("#### Detailed Shape Information\n");
        self.push(format!("**Total shapes**: {}\n", page.shape_count()));

        let mut listed = 0;
        for shape in page.shapes.iter().filter(|s| s.has_content()) {
            listed += 1;
            self.render_shape(listed, shape);
        }

        if listed == 0 {
            self.push("*No shapes with content found on this page*\n");
        }
    }

    fn render_page_media(&mut self, media: &[MediaItem]) {
        self.push(format!("#### Page-Level Media ({} items)\n", media.len()));
        for (idx, item) in media.iter().enumerate() {
            self.push(format!(
                "**Media Item {}** (Source: {})",
                idx + 1,
                item.source
            ));
            self.push("");
        }
    }

    fn render_shape(&mut self, number: usize, shape: &ShapeRecord) {
        self.push(format!("##### Shape {}", number));

        if !shape.shape_type.is_empty() {
            self.push(format!("- **Type**: {}", shape.shape_type));
        }
        if !shape.name.is_empty() {
            self.push(format!("- **Name**: {}", shape.name));
        }
        if !shape.text.is_empty() {
            self.push(format!("- **Text**: {}", shape.text.trim()));
        }
        if let Some(id) = &shape.id {
            self.push(format!("- **ID**: {}", id));
        }
        if shape.has_image {
            self.push(format!("- **Contains Image**: {} Yes", CHECK_GLYPH));
        }

        if !shape.sub_shapes.is_empty() {
            self.push(format!("- **Sub-shapes**: {}", shape.sub_shapes.len()));
            for sub in &shape.sub_shapes {
                if sub.text.is_empty() && !sub.has_image {
                    continue;
                }
                let marker = if sub.has_image {
                    format!(" {}", IMAGE_GLYPH)
                } else {
                    String::new()
                };
                self.push(format!("  - {}{}", sub.label(), marker));
            }
        }

        self.push("");
    }
}
