//! stream/accumulator.rs
//! Collects input fragments until the declared length is reached.

use std::io::{self, Read};

use bytes::{Bytes, BytesMut};
use thiserror::Error;
use tracing::{debug, info};

use crate::constants::MAX_CHUNK_SIZE;

#[derive(Debug, Error)]
pub enum AccumulateError {
    #[error("length mismatch: expected {expected} bytes, received at least {received}")]
    Overflow { expected: usize, received: usize },

    #[error("length mismatch: input ended after {received} of {expected} bytes")]
    Truncated { expected: usize, received: usize },

    #[error("accumulator incomplete: {received} of {expected} bytes")]
    Incomplete { expected: usize, received: usize },

    #[error("read failed after {received} bytes: {source}")]
    Read {
        received: usize,
        #[source]
        source: io::Error,
    },
}

/// Buffer that grows monotonically up to a fixed expected length.
#[derive(Debug)]
pub struct InputAccumulator {
    expected: usize,
    buffer: BytesMut,
    fragments: u64,
}

impl InputAccumulator {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            // Declared lengths are untrusted; cap the up-front reservation.
            buffer: BytesMut::with_capacity(expected.min(MAX_CHUNK_SIZE)),
            fragments: 0,
        }
    }

    /// Append one fragment.
    ///
    /// A fragment that would push the total past the expected length is rejected
    /// as a whole and the bytes already held are left as they were.
    pub fn accept(&mut self, chunk: &[u8]) -> Result<(), AccumulateError> {
        let received = self.buffer.len() + chunk.len();
        if received > self.expected {
            return Err(AccumulateError::Overflow { expected: self.expected, received });
        }
        self.buffer.extend_from_slice(chunk);
        self.fragments += 1;
        debug!(fragment = self.fragments, len = chunk.len(), total = received, "accepted input fragment");
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.buffer.len() == self.expected
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.expected - self.buffer.len()
    }

    pub fn expected(&self) -> usize {
        self.expected
    }

    /// Number of fragments accepted so far.
    pub fn fragments(&self) -> u64 {
        self.fragments
    }

    /// Hand the completed buffer over. Consumes the accumulator.
    pub fn into_bytes(self) -> Result<Bytes, AccumulateError> {
        if !self.is_complete() {
            return Err(AccumulateError::Incomplete {
                expected: self.expected,
                received: self.buffer.len(),
            });
        }
        Ok(self.buffer.freeze())
    }
}

/// Read from `reader` until `expected` bytes have been accepted.
///
/// Each read asks for at most `min(read_size, remaining)` bytes, so accumulation
/// stops exactly at the expected length. With `reject_trailing` one extra read is
/// issued after completion and any byte it yields is an overflow.
pub fn accumulate<R: Read + ?Sized>(
    reader: &mut R,
    expected: usize,
    read_size: usize,
    reject_trailing: bool,
) -> Result<InputAccumulator, AccumulateError> {
    let mut acc = InputAccumulator::new(expected);
    let mut buf = vec![0u8; read_size.max(1).min(expected.max(1))];

    while !acc.is_complete() {
        let want = acc.remaining().min(buf.len());
        let n = match reader.read(&mut buf[..want]) {
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(AccumulateError::Read { received: acc.len(), source }),
        };
        if n == 0 {
            return Err(AccumulateError::Truncated { expected, received: acc.len() });
        }
        acc.accept(&buf[..n])?;
    }

    if reject_trailing {
        check_no_trailing(reader, &mut buf, expected)?;
    }

    info!(bytes = acc.len(), fragments = acc.fragments(), "input complete");
    Ok(acc)
}

fn check_no_trailing<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    expected: usize,
) -> Result<(), AccumulateError> {
    loop {
        match reader.read(buf) {
            Ok(0) => return Ok(()),
            Ok(n) => {
                return Err(AccumulateError::Overflow { expected, received: expected + n });
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(AccumulateError::Read { received: expected, source }),
        }
    }
}
