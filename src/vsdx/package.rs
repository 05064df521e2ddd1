//! In-memory view of a VSDX (OPC/zip) package.
//!
//! Every part is read up front so that the native handles can borrow bytes
//! from the package without holding the archive open.

use std::collections::HashMap;
use std::io::{Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use super::xml::{attribute, first_texts, part_text};
use crate::error::{Error, Result};
use crate::native::{DocumentProperties, ProbeError};

/// Part listing the pages of the drawing.
pub(crate) const PAGES_PART: &str = "visio/pages/pages.xml";
/// Part listing the masters of the drawing.
pub(crate) const MASTERS_PART: &str = "visio/masters/masters.xml";
/// Core document properties.
pub(crate) const CORE_PROPS_PART: &str = "docProps/core.xml";
/// Extended (application) document properties.
pub(crate) const APP_PROPS_PART: &str = "docProps/app.xml";

const PAGE_PART_PREFIX: &str = "visio/pages/page";
const IMAGE_REL_SUFFIX: &str = "/image";

/// All non-directory entries of a package, keyed by part name.
#[derive(Debug, Default)]
pub(crate) struct Parts {
    entries: HashMap<String, Vec<u8>>,
}

impl Parts {
    /// Read every entry of a zip archive into memory.
    pub(crate) fn read<R: Read + Seek>(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;
        let mut entries = HashMap::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }
            let name = file.name().trim_start_matches('/').to_string();
            let mut data = Vec::with_capacity(file.size() as usize);
            file.read_to_end(&mut data)
                .map_err(|e| Error::ReadFailure(format!("{}: {}", name, e)))?;
            entries.insert(name, data);
        }

        Ok(Self { entries })
    }

    /// Raw bytes of a part.
    pub(crate) fn get(&self, name: &str) -> Option<&[u8]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Text of a part, if present.
    pub(crate) fn text(&self, name: &str) -> Option<std::result::Result<&str, ProbeError>> {
        self.get(name).map(|data| part_text(name, data))
    }

    /// Check whether a part exists.
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Page parts (`visio/pages/pageN.xml`) in numeric order.
    pub(crate) fn page_parts(&self) -> Vec<String> {
        let mut numbered: Vec<(u32, &String)> = self
            .entries
            .keys()
            .filter_map(|name| {
                let number = name
                    .strip_prefix(PAGE_PART_PREFIX)?
                    .strip_suffix(".xml")?
                    .parse::<u32>()
                    .ok()?;
                Some((number, name))
            })
            .collect();
        numbered.sort_by_key(|(number, _)| *number);
        numbered.into_iter().map(|(_, name)| name.clone()).collect()
    }

    /// Relationships declared by a part, keyed by relationship id.
    ///
    /// A part without a relationships part has no relationships.
    pub(crate) fn relationships(
        &self,
        part: &str,
    ) -> std::result::Result<Relationships, ProbeError> {
        let rels_name = rels_part_for(part);
        match self.text(&rels_name) {
            None => Ok(Relationships::default()),
            Some(text) => parse_relationships(part, text?)
                .map_err(|e| ProbeError::new(format!("{}: {}", rels_name, e))),
        }
    }
}

/// One package relationship with its target resolved to a part name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Relationship {
    pub(crate) id: String,
    pub(crate) rel_type: String,
    pub(crate) target: String,
}

impl Relationship {
    /// Whether the relationship points at an image part.
    pub(crate) fn is_image(&self) -> bool {
        self.rel_type.ends_with(IMAGE_REL_SUFFIX)
    }
}

/// Relationships of a single part, in declaration order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Relationships {
    items: Vec<Relationship>,
}

impl Relationships {
    pub(crate) fn get(&self, id: &str) -> Option<&Relationship> {
        self.items.iter().find(|rel| rel.id == id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.items.iter()
    }
}

fn parse_relationships(
    source_part: &str,
    xml: &str,
) -> std::result::Result<Relationships, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut items = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let external = attribute(e, &reader, b"TargetMode")
                    .is_some_and(|mode| mode.eq_ignore_ascii_case("External"));
                if let (Some(id), Some(target), false) = (
                    attribute(e, &reader, b"Id"),
                    attribute(e, &reader, b"Target"),
                    external,
                ) {
                    items.push(Relationship {
                        id,
                        rel_type: attribute(e, &reader, b"Type").unwrap_or_default(),
                        target: resolve_target(source_part, &target),
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(Relationships { items })
}

/// Name of the relationships part belonging to `part`.
pub(crate) fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against the part that declares it.
pub(crate) fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }

    let mut segments: Vec<&str> = match source_part.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// One entry of the page list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageEntry {
    pub(crate) name: Option<String>,
    pub(crate) part: String,
}

/// List the pages of a package in document order.
///
/// Uses the page list part when present and falls back to the numbered page
/// parts otherwise. Fails when the page list is unreadable or no page can be
/// found at all.
pub(crate) fn list_pages(parts: &Parts) -> std::result::Result<Vec<PageEntry>, ProbeError> {
    let entries = match parts.text(PAGES_PART) {
        Some(text) => {
            let rels = parts.relationships(PAGES_PART)?;
            parse_page_list(text?, &rels)
                .map_err(|e| ProbeError::new(format!("{}: {}", PAGES_PART, e)))?
        }
        None => parts
            .page_parts()
            .into_iter()
            .map(|part| PageEntry { name: None, part })
            .collect(),
    };

    if entries.is_empty() {
        return Err(ProbeError::new("package contains no pages"));
    }
    Ok(entries)
}

fn parse_page_list(
    xml: &str,
    rels: &Relationships,
) -> std::result::Result<Vec<PageEntry>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut entries = Vec::new();
    let mut current_name: Option<String> = None;
    let mut in_page = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.local_name().as_ref() == b"Page" => {
                in_page = true;
                current_name =
                    attribute(e, &reader, b"Name").or_else(|| attribute(e, &reader, b"NameU"));
            }
            Event::End(ref e) if e.local_name().as_ref() == b"Page" => {
                in_page = false;
                current_name = None;
            }
            Event::Start(ref e) | Event::Empty(ref e)
                if in_page && e.local_name().as_ref() == b"Rel" =>
            {
                let target = attribute(e, &reader, b"r:id")
                    .and_then(|id| rels.get(&id))
                    .map(|rel| rel.target.clone());
                if let Some(part) = target {
                    entries.push(PageEntry {
                        name: current_name.clone(),
                        part,
                    });
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(entries)
}

/// Master names keyed by master id.
pub(crate) fn read_masters(
    parts: &Parts,
) -> std::result::Result<HashMap<String, String>, ProbeError> {
    let Some(text) = parts.text(MASTERS_PART) else {
        return Ok(HashMap::new());
    };
    parse_masters(text?).map_err(|e| ProbeError::new(format!("{}: {}", MASTERS_PART, e)))
}

fn parse_masters(xml: &str) -> std::result::Result<HashMap<String, String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut masters = HashMap::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e)
                if e.local_name().as_ref() == b"Master" =>
            {
                let id = attribute(e, &reader, b"ID");
                let name =
                    attribute(e, &reader, b"Name").or_else(|| attribute(e, &reader, b"NameU"));
                if let (Some(id), Some(name)) = (id, name) {
                    masters.insert(id, name);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(masters)
}

/// Read title, creator and company from the property parts.
///
/// Returns `Ok(None)` when the package carries no property parts.
pub(crate) fn read_properties(
    parts: &Parts,
) -> std::result::Result<Option<DocumentProperties>, ProbeError> {
    if !parts.contains(CORE_PROPS_PART) && !parts.contains(APP_PROPS_PART) {
        return Ok(None);
    }

    let mut props = DocumentProperties::default();

    if let Some(text) = parts.text(CORE_PROPS_PART) {
        let found = first_texts(text?, &["title", "creator"])
            .map_err(|e| ProbeError::new(format!("{}: {}", CORE_PROPS_PART, e)))?;
        let mut found = found.into_iter();
        props.title = found.next().flatten();
        props.creator = found.next().flatten();
    }

    if let Some(text) = parts.text(APP_PROPS_PART) {
        let found = first_texts(text?, &["Company"])
            .map_err(|e| ProbeError::new(format!("{}: {}", APP_PROPS_PART, e)))?;
        props.company = found.into_iter().next().flatten();
    }

    Ok(Some(props))
}
