//! Document reader abstraction layer.
//!
//! Provides capability-typed interfaces for the object graph exposed by a
//! document-reading library, isolating the concrete reader (see
//! [`crate::vsdx`]) from the extraction logic.
//!
//! Every probed member returns a [`Probe`]: `Ok(None)` when the reader does
//! not expose the member, `Err(_)` when looking it up or computing it failed,
//! and `Ok(Some(value))` otherwise. All members default to `Ok(None)`, so an
//! adapter implements only what its library offers.

use thiserror::Error;

use crate::model::ShapeId;

/// Failure raised by a reader while probing a member.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ProbeError(pub String);

impl ProbeError {
    /// Create a new probe error.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Outcome of probing one member of a native object.
pub type Probe<T> = std::result::Result<Option<T>, ProbeError>;

/// A boxed native shape borrowed from its reader.
pub type ShapeRef<'a> = Box<dyn NativeShape + 'a>;

/// Zero or more child shapes.
pub type Children<'a> = Vec<ShapeRef<'a>>;

/// A page slot: either a readable page or the reason it could not be read.
pub type PageSlot<'a> = std::result::Result<Box<dyn NativePage + 'a>, ProbeError>;

/// Read a probed member, substituting `None` when it is absent or failed.
///
/// Pure: never logs and never propagates the failure.
pub fn attr<T>(probe: Probe<T>) -> Option<T> {
    probe.ok().flatten()
}

/// Read a probed member, substituting `default` when it is absent or failed.
pub fn attr_or<T>(probe: Probe<T>, default: T) -> T {
    attr(probe).unwrap_or(default)
}

/// Objects that may hold child shapes under several member names.
pub trait ShapeContainer {
    /// Primary shape collection.
    fn shapes(&self) -> Probe<Children<'_>> {
        Ok(None)
    }

    /// Nested shape collection.
    fn child_shapes(&self) -> Probe<Children<'_>> {
        Ok(None)
    }

    /// Secondary shape collection.
    fn sub_shapes(&self) -> Probe<Children<'_>> {
        Ok(None)
    }
}

/// One visual element of a page.
pub trait NativeShape: ShapeContainer {
    /// Shape text.
    fn text(&self) -> Probe<String> {
        Ok(None)
    }

    /// Shape name.
    fn name(&self) -> Probe<String> {
        Ok(None)
    }

    /// Primary identifier ("ID").
    fn id(&self) -> Probe<ShapeId> {
        Ok(None)
    }

    /// Fallback identifier ("id"), consulted when the primary one is absent.
    fn legacy_id(&self) -> Probe<ShapeId> {
        Ok(None)
    }

    /// Master (template) this shape was instantiated from.
    fn master(&self) -> Probe<Box<dyn NativeMaster + '_>> {
        Ok(None)
    }

    /// Connector join entries involving this shape.
    fn connects(&self) -> Probe<Vec<Box<dyn NativeConnect + '_>>> {
        Ok(None)
    }

    /// One-dimensional marker. Its presence, whatever the value, marks the
    /// shape as a candidate connector.
    fn one_d(&self) -> Probe<bool> {
        Ok(None)
    }

    /// Shape glued to the begin point of a 1-D shape.
    fn begin_shape(&self) -> Probe<ShapeRef<'_>> {
        Ok(None)
    }

    /// Shape glued to the end point of a 1-D shape.
    fn end_shape(&self) -> Probe<ShapeRef<'_>> {
        Ok(None)
    }

    /// Raw embedded image data.
    fn image_data(&self) -> Probe<Vec<u8>> {
        Ok(None)
    }

    /// Embedded image.
    fn image(&self) -> Probe<Vec<u8>> {
        Ok(None)
    }

    /// Embedded file reference payload.
    fn file(&self) -> Probe<Vec<u8>> {
        Ok(None)
    }

    /// Fill definition of the shape.
    fn fill(&self) -> Probe<Box<dyn NativeFill + '_>> {
        Ok(None)
    }
}

/// A master (template) shape.
pub trait NativeMaster {
    /// Master name.
    fn name(&self) -> Probe<String> {
        Ok(None)
    }

    /// Image data carried by the master.
    fn image_data(&self) -> Probe<Vec<u8>> {
        Ok(None)
    }
}

/// A shape fill.
pub trait NativeFill {
    /// Image used as fill.
    fn image(&self) -> Probe<Vec<u8>> {
        Ok(None)
    }
}

/// One connector join entry.
pub trait NativeConnect {
    /// Shape on the "from" side of the join.
    fn from_shape(&self) -> Probe<ShapeRef<'_>> {
        Ok(None)
    }

    /// Shape on the "to" side of the join.
    fn to_shape(&self) -> Probe<ShapeRef<'_>> {
        Ok(None)
    }
}

/// A media collection exposed by a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCollection {
    /// Payloads addressed by position
    Sequence(Vec<Vec<u8>>),
    /// Payloads addressed by key, in reader order
    Keyed(Vec<(String, Vec<u8>)>),
}

impl MediaCollection {
    /// Number of payloads in the collection.
    pub fn len(&self) -> usize {
        match self {
            MediaCollection::Sequence(items) => items.len(),
            MediaCollection::Keyed(items) => items.len(),
        }
    }

    /// Check if the collection holds no payloads.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One diagram page.
pub trait NativePage: ShapeContainer {
    /// Page name.
    fn name(&self) -> Probe<String> {
        Ok(None)
    }

    /// Page-level media collection.
    fn media(&self) -> Probe<MediaCollection> {
        Ok(None)
    }

    /// Page-level images collection.
    fn images(&self) -> Probe<MediaCollection> {
        Ok(None)
    }
}

/// Document properties exposed by a reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentProperties {
    /// Document title
    pub title: Option<String>,
    /// Document creator
    pub creator: Option<String>,
    /// Company
    pub company: Option<String>,
}

/// An opened document.
pub trait NativeDocument {
    /// Enumerate pages in document order.
    ///
    /// An outer error means the document itself cannot be trusted; an error
    /// in a single slot affects that page only.
    fn pages(&self) -> std::result::Result<Vec<PageSlot<'_>>, ProbeError>;

    /// Document properties.
    fn properties(&self) -> Probe<DocumentProperties> {
        Ok(None)
    }
}
