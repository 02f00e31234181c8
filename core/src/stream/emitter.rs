//! stream/emitter.rs
//! Writes one finished buffer to a sink in bounded slices.
//!
//! The count returned by each `write` call is the only thing that advances the
//! cursor. A sink may accept fewer bytes than offered (pipes, sockets, throttled
//! writers); the unaccepted tail is offered again on the next iteration.

use std::io::{self, Write};

use bytes::{Buf, Bytes};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::constants::MAX_CHUNK_SIZE;

#[derive(Debug, Error)]
pub enum EmitError {
    #[error("invalid chunk size {have} (must be 1..={max})")]
    InvalidChunkSize { have: usize, max: usize },

    #[error("sink accepted no bytes at offset {offset} with {remaining} bytes left")]
    WriteZero { offset: usize, remaining: usize },

    #[error("sink reported {written} bytes written for a {requested}-byte slice at offset {offset}")]
    OverReported { offset: usize, requested: usize, written: usize },

    #[error("write failed at offset {offset}: {source}")]
    Write {
        offset: usize,
        #[source]
        source: io::Error,
    },

    #[error("flush failed after {written} bytes: {source}")]
    Flush {
        written: usize,
        #[source]
        source: io::Error,
    },
}

/// Outcome of one drain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainReport {
    pub bytes_written: u64,
    /// Write calls that accepted at least one byte.
    pub writes: u64,
    /// Writes that accepted fewer bytes than requested.
    pub short_writes: u64,
}

pub fn validate_chunk_size(chunk_size: usize) -> Result<(), EmitError> {
    if chunk_size == 0 || chunk_size > MAX_CHUNK_SIZE {
        return Err(EmitError::InvalidChunkSize { have: chunk_size, max: MAX_CHUNK_SIZE });
    }
    Ok(())
}

pub struct ChunkedEmitter<W: Write> {
    out: W,
    chunk_size: usize,
}

impl<W: Write> ChunkedEmitter<W> {
    pub fn new(out: W, chunk_size: usize) -> Result<Self, EmitError> {
        validate_chunk_size(chunk_size)?;
        Ok(Self { out, chunk_size })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Write all of `buffer`, one `write` call per iteration, then flush.
    ///
    /// An empty buffer performs no writes. Any sink error other than
    /// `Interrupted` aborts the drain.
    pub fn drain(&mut self, mut buffer: Bytes) -> Result<DrainReport, EmitError> {
        let total = buffer.len();
        let mut report = DrainReport::default();

        while buffer.has_remaining() {
            let offset = total - buffer.remaining();
            let requested = buffer.remaining().min(self.chunk_size);

            let written = match self.out.write(&buffer.chunk()[..requested]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => return Err(EmitError::Write { offset, source }),
            };

            if written == 0 {
                return Err(EmitError::WriteZero { offset, remaining: buffer.remaining() });
            }
            if written > requested {
                return Err(EmitError::OverReported { offset, requested, written });
            }
            if written < requested {
                report.short_writes += 1;
                warn!(offset, requested, written, "short write");
            } else {
                debug!(offset, written, "chunk written");
            }

            buffer.advance(written);
            report.writes += 1;
            report.bytes_written += written as u64;
        }

        self.out
            .flush()
            .map_err(|source| EmitError::Flush { written: total, source })?;

        info!(
            bytes = report.bytes_written,
            writes = report.writes,
            short_writes = report.short_writes,
            "output drained"
        );
        Ok(report)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// One-shot drain of `buffer` into `out`.
pub fn drain<W: Write>(out: W, buffer: Bytes, chunk_size: usize) -> Result<DrainReport, EmitError> {
    ChunkedEmitter::new(out, chunk_size)?.drain(buffer)
}
