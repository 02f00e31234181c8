//! inflate-harness-core
//!
//! Reads a compressed payload of declared length, inflates it once, and writes
//! the result back out in bounded chunks.
//! No process handling here; the `inflate-harness` binary owns that.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

pub mod compression;
pub mod telemetry;

// Accumulate / decompress / drain
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::compression::{create_decompressor, CompressionError, Decompressor, InflateFormat};
    pub use crate::stream::{
        accumulate, drain, inflate_stream, run_pipeline, ChunkedEmitter, HarnessConfig,
        InputAccumulator,
    };
    pub use crate::telemetry::TelemetrySnapshot;
    pub use crate::types::HarnessError;
}
