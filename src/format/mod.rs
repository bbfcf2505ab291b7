//! Document format, persistence, and related errors.

mod document;
mod error;
mod persist;

pub use document::{Document, DocumentMetadata, PageEntry};
pub use error::FormatError;
pub use persist::{JsonFileSink, NullSink, PersistSink};
