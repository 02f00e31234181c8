//! compression/types.rs
//! Format identifiers, codec errors and the decompressor trait.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Container formats understood by the inflate codecs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InflateFormat {
    /// Bare DEFLATE stream (RFC 1951), no header or trailer.
    #[default]
    Raw,
    /// DEFLATE inside a zlib wrapper (RFC 1950).
    Zlib,
    /// DEFLATE inside a gzip member (RFC 1952).
    Gzip,
    /// Pick one of the above by sniffing the first bytes.
    Auto,
}

impl InflateFormat {
    pub const ALL: [InflateFormat; 4] = [
        InflateFormat::Raw,
        InflateFormat::Zlib,
        InflateFormat::Gzip,
        InflateFormat::Auto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InflateFormat::Raw  => "raw",
            InflateFormat::Zlib => "zlib",
            InflateFormat::Gzip => "gzip",
            InflateFormat::Auto => "auto",
        }
    }
}

impl fmt::Display for InflateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InflateFormat {
    type Err = CompressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        InflateFormat::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == lowered)
            .ok_or_else(|| CompressionError::UnknownFormat { name: s.to_string() })
    }
}

#[derive(Debug, Error)]
pub enum CompressionError {
    #[error("unknown inflate format: {name:?} (expected raw, zlib, gzip or auto)")]
    UnknownFormat { name: String },

    #[error("codec {codec}: malformed stream: {msg}")]
    Malformed { codec: &'static str, msg: String },

    #[error("codec {codec}: stream truncated after {consumed} of {available} input bytes")]
    Truncated { codec: &'static str, consumed: usize, available: usize },

    #[error("codec {codec}: decompressed output exceeds limit of {limit} bytes")]
    OutputLimit { codec: &'static str, limit: usize },
}

impl CompressionError {
    /// Codec that raised the error, if any.
    pub fn codec(&self) -> Option<&'static str> {
        match self {
            CompressionError::UnknownFormat { .. } => None,
            CompressionError::Malformed { codec, .. }
            | CompressionError::Truncated { codec, .. }
            | CompressionError::OutputLimit { codec, .. } => Some(*codec),
        }
    }
}

/// One-shot decompression capability.
///
/// Receives the complete compressed buffer and returns the complete decompressed
/// buffer. Implementations must not produce partial output on failure.
// Require Send so trait objects can cross thread boundaries.
pub trait Decompressor: Send {
    /// Decompress `input` in full.
    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>, CompressionError>;

    /// Short codec name for logs and telemetry.
    fn name(&self) -> &'static str;
}

impl<D: Decompressor + ?Sized> Decompressor for Box<D> {
    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        (**self).decompress(input)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
