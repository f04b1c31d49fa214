//! Application configuration

mod options;

pub use options::Options;
