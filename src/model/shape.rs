//! Shape-level types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A shape identifier as exposed by the document reader.
///
/// Readers report identifiers either as text or as integers; both are kept
/// verbatim so the structured record round-trips the reader's view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShapeId {
    /// Integer identifier
    Number(i64),
    /// Textual identifier
    Text(String),
}

impl ShapeId {
    /// Whether this identifier counts as present.
    ///
    /// An empty string and the integer `0` are treated as absent.
    pub fn is_present(&self) -> bool {
        match self {
            ShapeId::Number(n) => *n != 0,
            ShapeId::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeId::Number(n) => write!(f, "{}", n),
            ShapeId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ShapeId {
    fn from(s: &str) -> Self {
        ShapeId::Text(s.to_string())
    }
}

impl From<String> for ShapeId {
    fn from(s: String) -> Self {
        ShapeId::Text(s)
    }
}

impl From<i64> for ShapeId {
    fn from(n: i64) -> Self {
        ShapeId::Number(n)
    }
}

/// A directed link between two shape identifiers.
///
/// Serialized as a two-element array `[from, to]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct Connection {
    /// Identifier of the source shape
    pub from: String,
    /// Identifier of the target shape
    pub to: String,
}

impl Connection {
    /// Create a new connection.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl From<(String, String)> for Connection {
    fn from((from, to): (String, String)) -> Self {
        Self { from, to }
    }
}

impl From<Connection> for (String, String) {
    fn from(conn: Connection) -> Self {
        (conn.from, conn.to)
    }
}

/// Canonical record for one shape and its retained descendants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    /// Shape text, trimmed
    pub text: String,

    /// Shape name
    pub name: String,

    /// Shape identifier
    pub id: Option<ShapeId>,

    /// Master (template) name, empty when the shape has no master
    #[serde(rename = "type")]
    pub shape_type: String,

    /// Nested shapes that carry content
    pub sub_shapes: Vec<ShapeRecord>,

    /// Connections this shape declares
    pub connections: Vec<Connection>,

    /// Whether an embedded image was found on the shape
    pub has_image: bool,
}

impl ShapeRecord {
    /// Create an empty shape record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: impl Into<ShapeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the master type.
    pub fn with_type(mut self, shape_type: impl Into<String>) -> Self {
        self.shape_type = shape_type.into();
        self
    }

    /// Mark the shape as image-bearing.
    pub fn with_image(mut self, has_image: bool) -> Self {
        self.has_image = has_image;
        self
    }

    /// Add a sub-shape.
    pub fn with_sub_shape(mut self, sub: ShapeRecord) -> Self {
        self.sub_shapes.push(sub);
        self
    }

    /// Add a connection.
    pub fn with_connection(mut self, connection: Connection) -> Self {
        self.connections.push(connection);
        self
    }

    /// Whether the shape carries any observable content.
    ///
    /// Sub-shapes failing this test are pruned from their parent, and the
    /// report lists only top-level shapes passing it.
    pub fn has_content(&self) -> bool {
        !self.text.is_empty()
            || !self.name.is_empty()
            || !self.sub_shapes.is_empty()
            || self.has_image
            || self.id.is_some()
    }

    /// Identifier rendered as text, if present and non-empty.
    pub fn id_string(&self) -> Option<String> {
        self.id
            .as_ref()
            .filter(|id| id.is_present())
            .map(ToString::to_string)
    }

    /// Text used to label the shape: its own text, or `Image_<id>` for a
    /// textless image-bearing shape.
    pub fn label(&self) -> String {
        if self.text.is_empty() && self.has_image {
            let id = self.id.as_ref().map(ToString::to_string).unwrap_or_default();
            format!("Image_{}", id)
        } else {
            self.text.clone()
        }
    }
}
