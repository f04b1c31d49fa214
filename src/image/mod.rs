//! Image container and metadata
//!
//! An `Image` combines one storage resource with an optional key/value
//! metadata side-table.

mod container;
mod metadata;

pub use container::Image;
pub use metadata::{FromMetadata, MetadataContainer, MetadataValue};
