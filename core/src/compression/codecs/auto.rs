//! codecs/auto.rs
//! Format sniffing front end over the concrete inflate codecs.

use tracing::debug;

use crate::compression::codecs::{DeflateDecompressor, GzipDecompressor};
use crate::compression::types::{CompressionError, Decompressor, InflateFormat};
use crate::constants::magic;

pub struct AutoDecompressor {
    limit: Option<usize>,
}

impl AutoDecompressor {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }
}

/// Guess the container format from the leading bytes.
///
/// Never returns `Auto`; anything that is neither gzip nor a valid zlib header is
/// treated as a bare DEFLATE stream.
pub fn sniff_format(input: &[u8]) -> InflateFormat {
    match input {
        [a, b, ..] if [*a, *b] == magic::GZIP => InflateFormat::Gzip,
        [cmf, flg, ..] if is_zlib_header(*cmf, *flg) => InflateFormat::Zlib,
        _ => InflateFormat::Raw,
    }
}

fn is_zlib_header(cmf: u8, flg: u8) -> bool {
    let method = cmf & 0x0f;
    let window = cmf >> 4;
    method == magic::ZLIB_CM_DEFLATE
        && window <= 7
        && (u16::from(cmf) * 256 + u16::from(flg)) % 31 == 0
}

impl Decompressor for AutoDecompressor {
    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let format = sniff_format(input);
        debug!(%format, "auto-detected container format");
        match format {
            InflateFormat::Gzip => GzipDecompressor::new(self.limit).decompress(input),
            InflateFormat::Zlib => DeflateDecompressor::zlib(self.limit).decompress(input),
            _ => DeflateDecompressor::raw(self.limit).decompress(input),
        }
    }

    fn name(&self) -> &'static str {
        "auto"
    }
}
