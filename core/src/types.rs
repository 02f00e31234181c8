use std::io;

use thiserror::Error;

use crate::compression::CompressionError;
use crate::stream::{AccumulateError, EmitError};

/// Unified harness error covering configuration, input, decoding and output.
/// - `From<T>` impls enable `?` across the pipeline.
/// - Every variant is fatal; the harness does not retry.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Rejected configuration value.
    #[error("config error: {0}")]
    Config(String),

    /// Input accumulation failure, including length mismatches.
    #[error("input error: {0}")]
    Accumulate(#[from] AccumulateError),

    /// Malformed, truncated or oversized compressed payload.
    #[error("decompression error: {0}")]
    Compression(#[from] CompressionError),

    /// Output drain failure.
    #[error("output error: {0}")]
    Emit(#[from] EmitError),

    /// Failure opening an input or output endpoint.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl HarnessError {
    /// True when the declared input length disagrees with what arrived.
    pub fn is_length_mismatch(&self) -> bool {
        matches!(
            self,
            HarnessError::Accumulate(AccumulateError::Overflow { .. })
                | HarnessError::Accumulate(AccumulateError::Truncated { .. })
        )
    }
}
