//! telemetry/snapshot.rs
//! Immutable end-of-run telemetry.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::telemetry::counters::TelemetryCounters;
use crate::telemetry::timers::{Stage, StageTimes, TelemetryTimer};

/// Counters, derived ratios and stage timings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub bytes_in: u64,
    pub fragments_in: u64,
    pub decode_calls: u64,
    pub bytes_out: u64,
    pub writes: u64,
    pub short_writes: u64,
    /// `bytes_out / bytes_in`, 0 when nothing was read.
    pub expansion_ratio: f64,
    pub throughput_out_bytes_per_sec: f64,
    pub elapsed: Duration,
    pub stage_times: StageTimes,
}

impl TelemetrySnapshot {
    pub fn from(counters: &TelemetryCounters, timer: &TelemetryTimer) -> Self {
        let elapsed = timer.elapsed();

        let expansion_ratio = if counters.bytes_in > 0 {
            counters.bytes_out as f64 / counters.bytes_in as f64
        } else {
            0.0
        };

        let throughput = if elapsed.as_secs_f64() > 0.0 {
            counters.bytes_out as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };

        Self {
            bytes_in: counters.bytes_in,
            fragments_in: counters.fragments_in,
            decode_calls: counters.decode_calls,
            bytes_out: counters.bytes_out,
            writes: counters.writes,
            short_writes: counters.short_writes,
            expansion_ratio,
            throughput_out_bytes_per_sec: throughput,
            elapsed,
            stage_times: timer.stage_times.clone(),
        }
    }

    pub fn total_stage_time(&self) -> Duration {
        self.stage_times.total()
    }

    pub fn has_all_stages(&self, expected: &[Stage]) -> bool {
        self.stage_times.has_all(expected)
    }

    /// Single-line JSON rendering.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Internal consistency: one decode per run, stage time within elapsed.
    pub fn sanity_check(&self) -> bool {
        self.decode_calls == 1 && self.total_stage_time() <= self.elapsed
    }
}
