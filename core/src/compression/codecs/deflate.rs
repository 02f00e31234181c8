//! Raw DEFLATE and zlib-wrapped DEFLATE via flate2's low-level inflater.
//!
//! Decoding is strict: the stream has to reach its end-of-stream marker, otherwise
//! the input is reported as truncated.

use flate2::{Decompress, FlushDecompress, Status};
use tracing::{debug, warn};

use crate::compression::types::{CompressionError, Decompressor};
use crate::constants::MIN_OUTPUT_RESERVE;

pub struct DeflateDecompressor {
    zlib_header: bool,
    limit: Option<usize>,
}

impl DeflateDecompressor {
    /// Bare DEFLATE (RFC 1951).
    pub fn raw(limit: Option<usize>) -> Self {
        Self { zlib_header: false, limit }
    }

    /// DEFLATE with a zlib header and Adler-32 trailer (RFC 1950).
    pub fn zlib(limit: Option<usize>) -> Self {
        Self { zlib_header: true, limit }
    }

    fn codec(&self) -> &'static str {
        if self.zlib_header { "zlib" } else { "deflate" }
    }
}

impl Decompressor for DeflateDecompressor {
    fn decompress(&mut self, input: &[u8]) -> Result<Vec<u8>, CompressionError> {
        let codec = self.codec();

        // An empty bare stream decodes to nothing; a zlib stream always needs its header.
        if input.is_empty() {
            if self.zlib_header {
                return Err(CompressionError::Truncated { codec, consumed: 0, available: 0 });
            }
            return Ok(Vec::new());
        }

        inflate_strict(Decompress::new(self.zlib_header), input, self.limit, codec)
    }

    fn name(&self) -> &'static str {
        self.codec()
    }
}

/// Drive `state` over `input` until end of stream.
pub(crate) fn inflate_strict(
    mut state: Decompress,
    input: &[u8],
    limit: Option<usize>,
    codec: &'static str,
) -> Result<Vec<u8>, CompressionError> {
    let hint = input.len().saturating_mul(4).max(MIN_OUTPUT_RESERVE);
    let mut out = Vec::with_capacity(match limit {
        Some(l) => hint.min(l.saturating_add(1)),
        None => hint,
    });

    loop {
        if out.len() == out.capacity() {
            let grow = out.capacity().max(MIN_OUTPUT_RESERVE);
            out.reserve(grow);
        }

        let before_in = state.total_in();
        let before_out = state.total_out();
        let consumed = before_in as usize;

        let status = state
            .decompress_vec(&input[consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| CompressionError::Malformed { codec, msg: e.to_string() })?;

        if let Some(l) = limit {
            if out.len() > l {
                return Err(CompressionError::OutputLimit { codec, limit: l });
            }
        }

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let progressed = state.total_in() != before_in || state.total_out() != before_out;
                // No progress with room left in `out` means the input ran dry mid-stream.
                if !progressed && out.len() < out.capacity() {
                    return Err(CompressionError::Truncated {
                        codec,
                        consumed: state.total_in() as usize,
                        available: input.len(),
                    });
                }
            }
        }
    }

    let consumed = state.total_in() as usize;
    if consumed < input.len() {
        warn!(codec, trailing = input.len() - consumed, "ignoring bytes after end of stream");
    }
    debug!(codec, consumed, produced = out.len(), "inflate complete");

    Ok(out)
}
