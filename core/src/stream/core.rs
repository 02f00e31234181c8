//! stream/core.rs
//! Run configuration and the top-level entry points.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use crate::compression::{create_decompressor, InflateFormat};
use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_READ_SIZE, MAX_CHUNK_SIZE};
use crate::stream::emitter::validate_chunk_size;
use crate::stream::io::{open_input, open_output, InputSource, OutputSink};
use crate::stream::pipeline::run_pipeline;
use crate::telemetry::TelemetrySnapshot;
use crate::types::HarnessError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessConfig {
    /// Largest slice handed to the output in a single write.
    pub chunk_size: usize,

    /// Largest read requested from the input.
    pub read_size: usize,

    /// Container format of the compressed payload.
    pub format: InflateFormat,

    /// Cap on the decompressed size; `None` means unlimited.
    pub max_output: Option<usize>,

    /// Fail when bytes follow the declared input length.
    pub reject_trailing: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            read_size: DEFAULT_READ_SIZE,
            format: InflateFormat::Raw,
            max_output: None,
            reject_trailing: false,
        }
    }
}

impl HarnessConfig {
    pub fn new(
        chunk_size: Option<usize>,
        read_size: Option<usize>,
        format: Option<InflateFormat>,
        max_output: Option<usize>,
        reject_trailing: Option<bool>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            chunk_size: chunk_size.unwrap_or(defaults.chunk_size),
            read_size: read_size.unwrap_or(defaults.read_size),
            format: format.unwrap_or(defaults.format),
            max_output,
            reject_trailing: reject_trailing.unwrap_or(defaults.reject_trailing),
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_format(mut self, format: InflateFormat) -> Self {
        self.format = format;
        self
    }

    pub fn validate(&self) -> Result<(), HarnessError> {
        validate_chunk_size(self.chunk_size)
            .map_err(|e| HarnessError::Config(e.to_string()))?;
        if self.read_size == 0 || self.read_size > MAX_CHUNK_SIZE {
            return Err(HarnessError::Config(format!(
                "invalid read size {} (must be 1..={})",
                self.read_size, MAX_CHUNK_SIZE
            )));
        }
        Ok(())
    }
}

/// Accumulate `expected` bytes from `input`, inflate them with the codec named by
/// `config.format`, and drain the result to `output`.
pub fn inflate_stream<R: Read + ?Sized, W: Write>(
    input: &mut R,
    output: W,
    expected: usize,
    config: &HarnessConfig,
) -> Result<TelemetrySnapshot, HarnessError> {
    let mut decompressor = create_decompressor(config.format, config.max_output);
    run_pipeline(input, output, expected, decompressor.as_mut(), config)
}

/// Same as [`inflate_stream`] over normalized endpoints.
///
/// Returns the captured bytes when `output` is [`OutputSink::Memory`].
pub fn inflate_endpoints(
    input: InputSource,
    output: OutputSink,
    expected: usize,
    config: &HarnessConfig,
) -> Result<(TelemetrySnapshot, Option<Vec<u8>>), HarnessError> {
    let mut reader = open_input(input)?;
    let (writer, captured) = open_output(output)?;

    let snapshot = inflate_stream(&mut reader, writer, expected, config)?;

    let captured = match captured {
        Some(buf) => {
            let guard = buf
                .lock()
                .map_err(|_| io::Error::new(io::ErrorKind::Other, "captured output buffer poisoned"))?;
            Some(guard.clone())
        }
        None => None,
    };
    Ok((snapshot, captured))
}
