//! Image resource abstraction
//!
//! Storage backends for images: a dense in-memory buffer and a disk resource
//! that defers to a pluggable decode driver.

mod disk;
mod handler;
mod memory;

pub use disk::DiskResource;
pub use handler::{ImageResource, ResourceType};
pub use memory::MemoryResource;
pub(crate) use memory::pixel_count;

pub(crate) use handler::check_bounds;
