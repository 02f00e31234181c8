//! stream/mod.rs
//! Input accumulation, chunked output and the pipeline joining them.

pub mod accumulator;
pub mod core;
pub mod emitter;
pub mod io;
pub mod pipeline;

pub use accumulator::{accumulate, AccumulateError, InputAccumulator};
pub use self::core::{inflate_endpoints, inflate_stream, HarnessConfig};
pub use emitter::{drain, ChunkedEmitter, DrainReport, EmitError};
pub use io::{open_input, open_output, InputSource, OutputSink, SharedBufferWriter, ShortWriter};
pub use pipeline::run_pipeline;
