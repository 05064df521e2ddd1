//! Canonical diagram model.
//!
//! This module defines the library-independent records produced by
//! extraction and consumed by the renderers. Records are built once by
//! their owning extraction step and never mutated afterwards.

mod document;
mod media;
mod page;
mod shape;

pub use document::{DocumentRecord, Metadata};
pub use media::{MediaIndex, MediaItem};
pub use page::PageRecord;
pub use shape::{Connection, ShapeId, ShapeRecord};
