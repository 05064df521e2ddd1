//! Small quick-xml helpers shared by the part parsers.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::native::ProbeError;

/// Decode a part as UTF-8 text.
pub(crate) fn part_text<'a>(name: &str, data: &'a [u8]) -> Result<&'a str, ProbeError> {
    std::str::from_utf8(data)
        .map_err(|e| ProbeError::new(format!("{} is not valid UTF-8: {}", name, e)))
}

/// Read one attribute value, unescaped.
pub(crate) fn attribute(
    e: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
    key: &[u8],
) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.decode_and_unescape_value(reader).ok())
        .map(|value| value.to_string())
}

/// Collect the text of the first element with each requested local name.
///
/// Used for flat property parts such as `docProps/core.xml`.
pub(crate) fn first_texts(
    xml: &str,
    local_names: &[&str],
) -> Result<Vec<Option<String>>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut found: Vec<Option<String>> = vec![None; local_names.len()];
    let mut current: Option<usize> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                let local = e.local_name();
                current = local_names
                    .iter()
                    .position(|name| name.as_bytes() == local.as_ref())
                    .filter(|&idx| found[idx].is_none());
            }
            Event::Text(e) => {
                if let Some(idx) = current {
                    let text = e.unescape()?;
                    let slot = found[idx].get_or_insert_with(String::new);
                    slot.push_str(&text);
                }
            }
            Event::End(_) => current = None,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(found)
}
