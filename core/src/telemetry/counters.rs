//! telemetry/counters.rs
//! Mutable counters filled in while a run progresses.
//!
//! Summary: Collects fragment, decode and write counts plus byte totals.
//! Converted into an immutable TelemetrySnapshot at the end of the run.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

use crate::stream::DrainReport;

/// Deterministic counters collected during one harness run
#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub bytes_in: u64,
    pub fragments_in: u64,
    pub decode_calls: u64,
    pub bytes_out: u64,
    pub writes: u64,
    pub short_writes: u64,
}

impl TelemetryCounters {
    /// Record the completed input buffer.
    pub fn add_input(&mut self, bytes: usize, fragments: u64) {
        self.bytes_in += bytes as u64;
        self.fragments_in += fragments;
    }

    /// Record one call into the decompressor.
    pub fn add_decode(&mut self) {
        self.decode_calls += 1;
    }

    /// Record a finished drain.
    pub fn add_drain(&mut self, report: &DrainReport) {
        self.bytes_out += report.bytes_written;
        self.writes += report.writes;
        self.short_writes += report.short_writes;
    }
}

impl AddAssign for TelemetryCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.bytes_in     += rhs.bytes_in;
        self.fragments_in += rhs.fragments_in;
        self.decode_calls += rhs.decode_calls;
        self.bytes_out    += rhs.bytes_out;
        self.writes       += rhs.writes;
        self.short_writes += rhs.short_writes;
    }
}
