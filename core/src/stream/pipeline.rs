//! stream/pipeline.rs
//! accumulate -> decompress (once) -> drain.
//!
//! Each stage runs to completion before the next one starts. Nothing is written
//! until decoding has succeeded, so a malformed payload leaves the output untouched.

use std::io::{Read, Write};

use bytes::Bytes;
use tracing::{debug, info};

use crate::compression::{resolve, Decompressor};
use crate::stream::accumulator::accumulate;
use crate::stream::core::HarnessConfig;
use crate::stream::emitter::ChunkedEmitter;
use crate::telemetry::{Stage, TelemetryCounters, TelemetrySnapshot, TelemetryTimer};
use crate::types::HarnessError;

/// Run one accumulate/decompress/drain cycle.
///
/// `expected` is the declared compressed length. The decompressor is called
/// exactly once, with the complete buffer.
pub fn run_pipeline<R, W, D>(
    input: &mut R,
    output: W,
    expected: usize,
    decompressor: &mut D,
    config: &HarnessConfig,
) -> Result<TelemetrySnapshot, HarnessError>
where
    R: Read + ?Sized,
    W: Write,
    D: Decompressor + ?Sized,
{
    config.validate()?;
    // Built up front so an invalid chunk size fails before any input is consumed.
    let mut emitter = ChunkedEmitter::new(output, config.chunk_size)?;

    let mut counters = TelemetryCounters::default();
    let mut timer = TelemetryTimer::new();

    debug!(
        expected,
        chunk_size = config.chunk_size,
        read_size = config.read_size,
        format = %config.format,
        codec = decompressor.name(),
        "pipeline start"
    );

    // ---- Accumulate ----
    let acc = timer.time(Stage::Read, || {
        accumulate(input, expected, config.read_size, config.reject_trailing)
    })?;
    counters.add_input(acc.len(), acc.fragments());
    let compressed = acc.into_bytes()?;

    // ---- Decompress ----
    let decompressed = timer.time(Stage::Decompress, || decompressor.decompress(&compressed))?;
    counters.add_decode();
    drop(compressed);
    let codec_info = resolve(config.format);
    info!(
        codec = decompressor.name(),
        format = codec_info.name,
        framed = codec_info.has_header,
        checksummed = codec_info.has_checksum,
        bytes = decompressed.len(),
        "payload decompressed"
    );

    // ---- Drain ----
    let report = timer.time(Stage::Write, || emitter.drain(Bytes::from(decompressed)))?;
    counters.add_drain(&report);

    timer.finish();
    Ok(TelemetrySnapshot::from(&counters, &timer))
}
