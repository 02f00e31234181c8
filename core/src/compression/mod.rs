//! compression/mod.rs
//! The decompression capability consumed by the pipeline.
//!
//! - One call per run: the pipeline hands over the fully accumulated buffer.
//! - Codecs are strict about truncation and never return partial output.
//! - Registry resolves a format to its codec.

pub mod types;
pub mod registry;
pub mod codecs;

pub use types::*;
pub use registry::*;
pub use codecs::sniff_format;
