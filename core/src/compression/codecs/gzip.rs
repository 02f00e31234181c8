//! gzip member decoding via flate2's reader.

use std::io::{self, Read};

use flate2::bufread::GzDecoder;
use tracing::{debug, warn};

use crate::compression::types::{CompressionError, Decompressor};

const CODEC: &str = "gzip";

pub struct GzipDecompressor {
    limit: Option<usize>,
}

impl GzipDecompressor {
    pub fn new(limit: Option<usize>) -> Self {
        Self { limit }
    }
}

impl Decompressor for GzipDecompressor {
    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        if input.is_empty() {
            return Err(CompressionError::Truncated { codec: CODEC, consumed: 0, available: 0 });
        }

        // The buffered decoder only consumes what the first member needs.
        let mut decoder = GzDecoder::new(input);
        let mut out = Vec::new();
        let read = match self.limit {
            // Read one byte past the limit so an oversized payload is detectable.
            Some(l) => (&mut decoder).take(l as u64 + 1).read_to_end(&mut out),
            None => decoder.read_to_end(&mut out),
        };
        read.map_err(|e| map_io(e, input.len()))?;

        if let Some(l) = self.limit {
            if out.len() > l {
                return Err(CompressionError::OutputLimit { codec: CODEC, limit: l });
            }
        }

        let trailing = decoder.into_inner().len();
        if trailing > 0 {
            warn!(codec = CODEC, trailing, "ignoring bytes after end of stream");
        }
        let consumed = input.len() - trailing;
        debug!(codec = CODEC, consumed, produced = out.len(), "inflate complete");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        CODEC
    }
}

fn map_io(e: io::Error, available: usize) -> CompressionError {
    match e.kind() {
        io::ErrorKind::UnexpectedEof => CompressionError::Truncated {
            codec: CODEC,
            consumed: available,
            available,
        },
        _ => CompressionError::Malformed { codec: CODEC, msg: e.to_string() },
    }
}
