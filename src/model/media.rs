//! Page-level media items (images attached to a page rather than a shape).

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Position of a media item inside the collection it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaIndex {
    /// Ordinal within a sequence-shaped collection
    Position(usize),
    /// Key within a mapping-shaped collection
    Key(String),
}

impl fmt::Display for MediaIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaIndex::Position(n) => write!(f, "{}", n),
            MediaIndex::Key(k) => f.write_str(k),
        }
    }
}

/// An image payload discovered directly on a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    /// Key or ordinal in the source collection
    pub index: MediaIndex,

    /// Raw payload, serialized as base64
    #[serde(serialize_with = "to_base64", deserialize_with = "from_base64")]
    pub data: Vec<u8>,

    /// Discovery strategy tag (e.g. "page.media")
    pub source: String,
}

impl MediaItem {
    /// Create a new media item.
    pub fn new(index: MediaIndex, data: Vec<u8>, source: impl Into<String>) -> Self {
        Self {
            index,
            data,
            source: source.into(),
        }
    }

    /// Get the size of the payload in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }
}

fn to_base64<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&BASE64_STANDARD.encode(data))
}

fn from_base64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    BASE64_STANDARD
        .decode(encoded.as_bytes())
        .map_err(serde::de::Error::custom)
}
