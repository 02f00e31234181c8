//! stream/io.rs
//! Normalized input/output endpoints for the harness.

use std::io::{self, Cursor, Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
    Memory,
}

/// Normalize input source into a boxed reader
pub fn open_input(src: InputSource) -> io::Result<Box<dyn Read + Send>> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => Box::new(std::fs::File::open(p)?),
        InputSource::Memory(b) => Box::new(Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer.
///
/// `Memory` returns the shared buffer the writer appends to, so the caller can
/// inspect what was emitted once the writer is done.
pub fn open_output(
    sink: OutputSink,
) -> io::Result<(Box<dyn Write + Send>, Option<Arc<Mutex<Vec<u8>>>>)> {
    match sink {
        OutputSink::Writer(w) => Ok((w, None)),
        OutputSink::File(p) => Ok((Box::new(std::fs::File::create(p)?), None)),
        OutputSink::Memory => {
            let buf = Arc::new(Mutex::new(Vec::new()));
            let writer = SharedBufferWriter::new(buf.clone());
            Ok((Box::new(writer), Some(buf)))
        }
    }
}

pub struct SharedBufferWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl SharedBufferWriter {
    pub fn new(buf: Arc<Mutex<Vec<u8>>>) -> Self {
        Self { buf }
    }
}

impl Write for SharedBufferWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "shared buffer poisoned"))?;
        guard.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writer adapter that accepts at most `max_per_write` bytes per call.
///
/// Models sinks that legitimately take less than offered, such as a pipe whose
/// buffer is nearly full.
pub struct ShortWriter<W: Write> {
    inner: W,
    max_per_write: usize,
    calls: u64,
}

impl<W: Write> ShortWriter<W> {
    pub fn new(inner: W, max_per_write: usize) -> Self {
        Self { inner, max_per_write: max_per_write.max(1), calls: 0 }
    }

    /// Number of `write` calls received.
    pub fn calls(&self) -> u64 {
        self.calls
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for ShortWriter<W> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.calls += 1;
        let n = data.len().min(self.max_per_write);
        self.inner.write(&data[..n])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
