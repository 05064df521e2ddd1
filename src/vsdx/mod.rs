//! VSDX package reader.
//!
//! Opens a `.vsdx` file (an OPC zip package of Visio XML parts) and exposes
//! it through the [`crate::native`] traits so the extraction layer can walk
//! it like any other document reader.
//!
//! # Example
//!
//! ```no_run
//! use unvsdx::native::NativeDocument;
//! use unvsdx::vsdx::VsdxPackage;
//!
//! let package = VsdxPackage::open("diagram.vsdx")?;
//! println!("{} pages", package.pages()?.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod package;
mod page;
mod xml;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

use crate::detect::is_package_bytes;
use crate::error::{Error, Result};
use crate::model::ShapeId;
use crate::native::{
    Children, DocumentProperties, MediaCollection, NativeConnect, NativeDocument, NativeMaster,
    NativePage, NativeShape, PageSlot, Probe, ProbeError, ShapeContainer, ShapeRef,
};

use package::{list_pages, read_masters, read_properties, Parts, Relationships};
use page::{ConnectRow, PageTree, ShapeNode};

const BEGIN_CELL: &str = "BeginX";
const END_CELL: &str = "EndX";

/// An opened VSDX package, held fully in memory.
#[derive(Debug)]
pub struct VsdxPackage {
    parts: Parts,
    masters: HashMap<String, String>,
}

impl VsdxPackage {
    /// Open a package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Open a package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if !is_package_bytes(data) {
            return Err(Error::ReadFailure("missing ZIP signature".to_string()));
        }
        Self::from_reader(Cursor::new(data))
    }

    fn from_reader<R: std::io::Read + std::io::Seek>(reader: R) -> Result<Self> {
        let parts = Parts::read(reader)?;
        // Masters only feed shape types; an unreadable list leaves types empty.
        let masters = read_masters(&parts).unwrap_or_else(|e| {
            log::warn!("Failed to read masters: {}", e);
            HashMap::new()
        });

        let package = Self { parts, masters };
        // A package without any page is not a drawing.
        list_pages(&package.parts).map_err(|e| Error::ReadFailure(e.to_string()))?;
        Ok(package)
    }

    fn load_page(
        &self,
        name: Option<String>,
        part: &str,
    ) -> std::result::Result<VsdxPage<'_>, ProbeError> {
        let text = self
            .parts
            .text(part)
            .ok_or_else(|| ProbeError::new(format!("missing page part {}", part)))??;
        let tree =
            PageTree::parse(text).map_err(|e| ProbeError::new(format!("{}: {}", part, e)))?;
        let rels = self.parts.relationships(part)?;
        log::debug!("Parsed {} with {} shapes", part, tree.nodes.len());

        Ok(VsdxPage {
            package: self,
            data: PageData { name, tree, rels },
        })
    }

    fn image_bytes(&self, rels: &Relationships, rel_id: &str) -> Probe<Vec<u8>> {
        let rel = rels
            .get(rel_id)
            .ok_or_else(|| ProbeError::new(format!("unknown relationship {}", rel_id)))?;
        let data = self
            .parts
            .get(&rel.target)
            .ok_or_else(|| ProbeError::new(format!("missing part {}", rel.target)))?;
        Ok(Some(data.to_vec()))
    }
}

impl NativeDocument for VsdxPackage {
    fn pages(&self) -> std::result::Result<Vec<PageSlot<'_>>, ProbeError> {
        let entries = list_pages(&self.parts)?;
        Ok(entries
            .into_iter()
            .map(|entry| {
                self.load_page(entry.name, &entry.part)
                    .map(|page| Box::new(page) as Box<dyn NativePage + '_>)
            })
            .collect())
    }

    fn properties(&self) -> Probe<DocumentProperties> {
        read_properties(&self.parts)
    }
}

/// Parsed content of one page.
#[derive(Debug)]
struct PageData {
    name: Option<String>,
    tree: PageTree,
    rels: Relationships,
}

/// A page of an open package.
#[derive(Debug)]
pub struct VsdxPage<'a> {
    package: &'a VsdxPackage,
    data: PageData,
}

impl<'a> VsdxPage<'a> {
    fn shape(&self, index: usize) -> ShapeRef<'_> {
        Box::new(VsdxShape {
            package: self.package,
            page: &self.data,
            index,
        })
    }
}

impl ShapeContainer for VsdxPage<'_> {
    fn shapes(&self) -> Probe<Children<'_>> {
        Ok(Some(
            self.data
                .tree
                .roots
                .iter()
                .map(|&index| self.shape(index))
                .collect(),
        ))
    }
}

impl NativePage for VsdxPage<'_> {
    fn name(&self) -> Probe<String> {
        Ok(self.data.name.clone())
    }

    /// Images related to the page but not placed in any shape.
    fn media(&self) -> Probe<MediaCollection> {
        let referenced: Vec<&str> = self.data.tree.foreign_rels().collect();
        let mut items = Vec::new();

        for rel in self.data.rels.iter() {
            if !rel.is_image() || referenced.contains(&rel.id.as_str()) {
                continue;
            }
            let data = self
                .package
                .parts
                .get(&rel.target)
                .ok_or_else(|| ProbeError::new(format!("missing part {}", rel.target)))?;
            items.push((rel.id.clone(), data.to_vec()));
        }

        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(MediaCollection::Keyed(items)))
    }
}

/// A shape of an open page.
struct VsdxShape<'p> {
    package: &'p VsdxPackage,
    page: &'p PageData,
    index: usize,
}

impl<'p> VsdxShape<'p> {
    fn node(&self) -> &'p ShapeNode {
        &self.page.tree.nodes[self.index]
    }

    fn at(&self, index: usize) -> ShapeRef<'p> {
        Box::new(VsdxShape {
            package: self.package,
            page: self.page,
            index,
        })
    }

    fn glued(&self, cell: &str) -> Probe<ShapeRef<'_>> {
        let Some(id) = self.node().id.as_deref() else {
            return Ok(None);
        };
        Ok(self.page.tree.glued_to(id, cell).map(|index| self.at(index)))
    }
}

impl ShapeContainer for VsdxShape<'_> {
    fn child_shapes(&self) -> Probe<Children<'_>> {
        let children = &self.node().children;
        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some(children.iter().map(|&index| self.at(index)).collect()))
    }
}

impl NativeShape for VsdxShape<'_> {
    fn text(&self) -> Probe<String> {
        Ok(self.node().text.clone())
    }

    fn name(&self) -> Probe<String> {
        Ok(self.node().name.clone())
    }

    fn id(&self) -> Probe<ShapeId> {
        Ok(self.node().id.clone().map(ShapeId::Text))
    }

    fn master(&self) -> Probe<Box<dyn NativeMaster + '_>> {
        Ok(self
            .node()
            .master
            .as_ref()
            .and_then(|id| self.package.masters.get(id))
            .map(|name| Box::new(VsdxMaster { name: name.clone() }) as Box<dyn NativeMaster>))
    }

    fn connects(&self) -> Probe<Vec<Box<dyn NativeConnect + '_>>> {
        let Some(id) = self.node().id.as_deref() else {
            return Ok(None);
        };
        let rows: Vec<Box<dyn NativeConnect + '_>> = self
            .page
            .tree
            .connects_of(id)
            .map(|row| {
                Box::new(VsdxConnect { shape: self, row }) as Box<dyn NativeConnect + '_>
            })
            .collect();
        if rows.is_empty() {
            return Ok(None);
        }
        Ok(Some(rows))
    }

    fn one_d(&self) -> Probe<bool> {
        let node = self.node();
        let glued = node.id.as_deref().is_some_and(|id| {
            self.page.tree.connects.iter().any(|row| {
                row.from_sheet == id
                    && matches!(row.from_cell.as_deref(), Some(BEGIN_CELL) | Some(END_CELL))
            })
        });
        Ok((node.one_d || glued).then_some(true))
    }

    fn begin_shape(&self) -> Probe<ShapeRef<'_>> {
        self.glued(BEGIN_CELL)
    }

    fn end_shape(&self) -> Probe<ShapeRef<'_>> {
        self.glued(END_CELL)
    }

    fn image_data(&self) -> Probe<Vec<u8>> {
        match self.node().foreign_rel.as_deref() {
            Some(rel_id) => self.package.image_bytes(&self.page.rels, rel_id),
            None => Ok(None),
        }
    }
}

struct VsdxMaster {
    name: String,
}

impl NativeMaster for VsdxMaster {
    fn name(&self) -> Probe<String> {
        Ok(Some(self.name.clone()))
    }
}

/// One connect row seen from a participating shape.
struct VsdxConnect<'s, 'p> {
    shape: &'s VsdxShape<'p>,
    row: &'p ConnectRow,
}

impl VsdxConnect<'_, '_> {
    fn sheet(&self, id: &str) -> Probe<ShapeRef<'_>> {
        Ok(self.shape.page.tree.find(id).map(|index| self.shape.at(index)))
    }
}

impl NativeConnect for VsdxConnect<'_, '_> {
    fn from_shape(&self) -> Probe<ShapeRef<'_>> {
        self.sheet(&self.row.from_sheet)
    }

    fn to_shape(&self) -> Probe<ShapeRef<'_>> {
        self.sheet(&self.row.to_sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::attr;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    const PAGE_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image1.png"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="../media/image2.emf"/>
</Relationships>"#;

    const PAGE: &str = r#"<PageContents xmlns:r="r">
  <Shapes>
    <Shape ID="1" Master="2"><Text>Start</Text></Shape>
    <Shape ID="2"><Text>End</Text></Shape>
    <Shape ID="3"><ForeignData><Rel r:id="rId1"/></ForeignData></Shape>
    <Shape ID="4"><Cell N="BeginX" V="0"/><Cell N="EndX" V="1"/></Shape>
  </Shapes>
  <Connects>
    <Connect FromSheet="4" FromCell="BeginX" ToSheet="1"/>
    <Connect FromSheet="4" FromCell="EndX" ToSheet="2"/>
  </Connects>
</PageContents>"#;

    fn package() -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        let files: [(&str, &[u8]); 5] = [
            ("visio/pages/page1.xml", PAGE.as_bytes()),
            ("visio/pages/_rels/page1.xml.rels", PAGE_RELS.as_bytes()),
            (
                "visio/masters/masters.xml",
                br#"<Masters><Master ID="2" Name="Terminator"/></Masters>"#,
            ),
            ("visio/media/image1.png", b"png-bytes"),
            ("visio/media/image2.emf", b"emf-bytes"),
        ];
        for (name, body) in files {
            zip.start_file(name, options).unwrap();
            zip.write_all(body).unwrap();
        }
        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_pages_and_shapes() {
        let package = VsdxPackage::from_bytes(&package()).unwrap();
        let pages = package.pages().unwrap();
        assert_eq!(pages.len(), 1);

        let page = pages[0].as_ref().unwrap();
        assert_eq!(attr(page.name()), None);
        let shapes = attr(page.shapes()).unwrap();
        assert_eq!(shapes.len(), 4);

        let start = &shapes[0];
        assert_eq!(attr(start.text()).as_deref(), Some("Start"));
        assert_eq!(attr(start.id()), Some(ShapeId::from("1")));
        let master = attr(start.master()).unwrap();
        assert_eq!(attr(master.name()).as_deref(), Some("Terminator"));

        assert_eq!(attr(shapes[2].image_data()), Some(b"png-bytes".to_vec()));
        assert_eq!(attr(shapes[1].image_data()), None);
    }

    #[test]
    fn test_connector_endpoints() {
        let package = VsdxPackage::from_bytes(&package()).unwrap();
        let pages = package.pages().unwrap();
        let page = pages[0].as_ref().unwrap();
        let shapes = attr(page.shapes()).unwrap();

        let connector = &shapes[3];
        assert_eq!(attr(connector.one_d()), Some(true));
        let begin = attr(connector.begin_shape()).unwrap();
        let end = attr(connector.end_shape()).unwrap();
        assert_eq!(attr(begin.id()), Some(ShapeId::from("1")));
        assert_eq!(attr(end.id()), Some(ShapeId::from("2")));

        let connects = attr(shapes[0].connects()).unwrap();
        assert_eq!(connects.len(), 1);
        let from = attr(connects[0].from_shape()).unwrap();
        assert_eq!(attr(from.id()), Some(ShapeId::from("4")));
        assert_eq!(attr(shapes[0].one_d()), None);
    }

    #[test]
    fn test_unreferenced_images_are_page_media() {
        let package = VsdxPackage::from_bytes(&package()).unwrap();
        let pages = package.pages().unwrap();
        let page = pages[0].as_ref().unwrap();

        assert_eq!(
            attr(page.media()),
            Some(MediaCollection::Keyed(vec![(
                "rId2".to_string(),
                b"emf-bytes".to_vec()
            )]))
        );
    }

    #[test]
    fn test_not_a_zip_is_read_failure() {
        let result = VsdxPackage::from_bytes(b"definitely not a zip");
        assert!(matches!(result, Err(Error::ReadFailure(_))));
    }

    #[test]
    fn test_malformed_page_is_a_failed_slot() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        zip.start_file("visio/pages/page1.xml", options).unwrap();
        zip.write_all(b"<PageContents><Shape></PageContents>").unwrap();
        zip.start_file("visio/pages/page2.xml", options).unwrap();
        zip.write_all(b"<PageContents/>").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let package = VsdxPackage::from_bytes(&bytes).unwrap();
        let pages = package.pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].is_err());
        assert!(pages[1].is_ok());
    }
}
