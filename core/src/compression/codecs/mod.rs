//! compression/codecs/mod.rs
//! Concrete inflate codecs.

pub mod auto;
pub mod deflate;
pub mod gzip;

pub use auto::*;
pub use deflate::*;
pub use gzip::*;
