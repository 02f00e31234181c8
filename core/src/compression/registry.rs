//! compression/registry.rs
//! Codec registry and factory functions.

use crate::compression::codecs::{auto, deflate, gzip};
use crate::compression::types::{Decompressor, InflateFormat};

pub struct CodecInfo {
    pub name: &'static str,
    pub has_header: bool,
    pub has_checksum: bool,
}

pub fn resolve(format: InflateFormat) -> CodecInfo {
    match format {
        InflateFormat::Raw =>
            CodecInfo { name: "deflate", has_header: false, has_checksum: false },
        InflateFormat::Zlib =>
            CodecInfo { name: "zlib", has_header: true, has_checksum: true },
        InflateFormat::Gzip =>
            CodecInfo { name: "gzip", has_header: true, has_checksum: true },
        InflateFormat::Auto =>
            CodecInfo { name: "auto", has_header: false, has_checksum: false },
    }
}

/// Build the decompressor for `format`, optionally capping its output size.
pub fn create_decompressor(format: InflateFormat, limit: Option<usize>) -> Box<dyn Decompressor> {
    match format {
        InflateFormat::Raw => Box::new(deflate::DeflateDecompressor::raw(limit)),
        InflateFormat::Zlib => Box::new(deflate::DeflateDecompressor::zlib(limit)),
        InflateFormat::Gzip => Box::new(gzip::GzipDecompressor::new(limit)),
        InflateFormat::Auto => Box::new(auto::AutoDecompressor::new(limit)),
    }
}
