//! Page part parsing into an index-based shape tree.

use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::xml::attribute;

/// Cell names that only 1-D shapes carry.
const ONE_D_CELLS: [&str; 2] = ["BeginX", "EndX"];

/// One `<Shape>` element of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ShapeNode {
    pub(crate) id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) master: Option<String>,
    /// Concatenated `<Text>` content, `None` when the shape has no text element
    pub(crate) text: Option<String>,
    /// Whether the shape carries begin/end cells
    pub(crate) one_d: bool,
    /// Relationship id of embedded foreign data (images, OLE objects)
    pub(crate) foreign_rel: Option<String>,
    pub(crate) children: Vec<usize>,
}

/// One `<Connect>` row: the `from_cell` of `from_sheet` is glued to `to_sheet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConnectRow {
    pub(crate) from_sheet: String,
    pub(crate) from_cell: Option<String>,
    pub(crate) to_sheet: String,
}

/// Shapes and connects of one page.
#[derive(Debug, Clone, Default)]
pub(crate) struct PageTree {
    pub(crate) nodes: Vec<ShapeNode>,
    pub(crate) roots: Vec<usize>,
    pub(crate) connects: Vec<ConnectRow>,
    by_id: HashMap<String, usize>,
}

impl PageTree {
    /// Parse a page part.
    pub(crate) fn parse(xml: &str) -> Result<Self, quick_xml::Error> {
        let mut reader = Reader::from_str(xml);
        // Whitespace inside <Text> is significant until the shape text is trimmed.
        reader.trim_text(false);

        let mut tree = PageTree::default();
        let mut stack: Vec<usize> = Vec::new();
        let mut in_text = false;
        let mut in_foreign = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => match e.local_name().as_ref() {
                    b"Shape" => {
                        let idx = tree.push_shape(e, &reader, stack.last().copied());
                        stack.push(idx);
                    }
                    b"Text" => {
                        if let Some(&idx) = stack.last() {
                            in_text = true;
                            tree.nodes[idx].text.get_or_insert_with(String::new);
                        }
                    }
                    b"ForeignData" => in_foreign = true,
                    _ => tree.handle_leaf(e, &reader, stack.last().copied(), in_foreign),
                },
                Event::Empty(ref e) => match e.local_name().as_ref() {
                    b"Shape" => {
                        tree.push_shape(e, &reader, stack.last().copied());
                    }
                    b"Text" => {
                        if let Some(&idx) = stack.last() {
                            tree.nodes[idx].text.get_or_insert_with(String::new);
                        }
                    }
                    _ => tree.handle_leaf(e, &reader, stack.last().copied(), in_foreign),
                },
                Event::Text(e) if in_text => {
                    if let Some(&idx) = stack.last() {
                        let text = e.unescape()?;
                        if let Some(buffer) = tree.nodes[idx].text.as_mut() {
                            buffer.push_str(&text);
                        }
                    }
                }
                Event::CData(e) if in_text => {
                    if let Some(&idx) = stack.last() {
                        let text = String::from_utf8_lossy(&e).into_owned();
                        if let Some(buffer) = tree.nodes[idx].text.as_mut() {
                            buffer.push_str(&text);
                        }
                    }
                }
                Event::End(ref e) => match e.local_name().as_ref() {
                    b"Shape" => {
                        stack.pop();
                    }
                    b"Text" => in_text = false,
                    b"ForeignData" => in_foreign = false,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        Ok(tree)
    }

    fn push_shape(
        &mut self,
        e: &BytesStart<'_>,
        reader: &Reader<&[u8]>,
        parent: Option<usize>,
    ) -> usize {
        let node = ShapeNode {
            id: attribute(e, reader, b"ID"),
            name: attribute(e, reader, b"Name").or_else(|| attribute(e, reader, b"NameU")),
            master: attribute(e, reader, b"Master"),
            ..Default::default()
        };
        let idx = self.nodes.len();
        if let Some(id) = &node.id {
            self.by_id.entry(id.clone()).or_insert(idx);
        }
        self.nodes.push(node);
        match parent {
            Some(parent) => self.nodes[parent].children.push(idx),
            None => self.roots.push(idx),
        }
        idx
    }

    fn handle_leaf(
        &mut self,
        e: &BytesStart<'_>,
        reader: &Reader<&[u8]>,
        current: Option<usize>,
        in_foreign: bool,
    ) {
        match e.local_name().as_ref() {
            b"Cell" => {
                let Some(idx) = current else { return };
                let is_one_d = attribute(e, reader, b"N")
                    .is_some_and(|name| ONE_D_CELLS.contains(&name.as_str()));
                if is_one_d {
                    self.nodes[idx].one_d = true;
                }
            }
            b"Rel" if in_foreign => {
                if let (Some(idx), Some(rel)) = (current, attribute(e, reader, b"r:id")) {
                    self.nodes[idx].foreign_rel = Some(rel);
                }
            }
            b"Connect" => {
                let from = attribute(e, reader, b"FromSheet");
                let to = attribute(e, reader, b"ToSheet");
                if let (Some(from_sheet), Some(to_sheet)) = (from, to) {
                    self.connects.push(ConnectRow {
                        from_sheet,
                        from_cell: attribute(e, reader, b"FromCell"),
                        to_sheet,
                    });
                }
            }
            _ => {}
        }
    }

    /// Index of the shape with the given id.
    pub(crate) fn find(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Connect rows in which the shape takes part on either side.
    pub(crate) fn connects_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ConnectRow> {
        self.connects
            .iter()
            .filter(move |row| row.from_sheet == id || row.to_sheet == id)
    }

    /// Shape glued to the given end cell of a 1-D shape.
    pub(crate) fn glued_to(&self, id: &str, cell: &str) -> Option<usize> {
        self.connects
            .iter()
            .filter(|row| row.from_sheet == id && row.from_cell.as_deref() == Some(cell))
            .last()
            .and_then(|row| self.find(&row.to_sheet))
    }

    /// Relationship ids referenced by shape foreign data.
    pub(crate) fn foreign_rels(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| node.foreign_rel.as_deref())
    }
}
