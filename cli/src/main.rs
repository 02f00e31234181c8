//! inflate-harness CLI
//!
//! Reads EXPECTED_LEN compressed bytes from stdin (or --input), inflates them and
//! writes the result to stdout (or --output) in chunks of at most --chunk-size bytes.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use inflate_harness_core::compression::InflateFormat;
use inflate_harness_core::constants::{env_vars, DEFAULT_CHUNK_SIZE, DEFAULT_READ_SIZE};
use inflate_harness_core::stream::{inflate_endpoints, HarnessConfig, InputSource, OutputSink};
use inflate_harness_core::telemetry::TelemetrySnapshot;

#[derive(Parser, Debug)]
#[command(name = "inflate-harness")]
#[command(about = "Inflate a fixed-length compressed payload and re-emit it in bounded chunks")]
#[command(version)]
struct Cli {
    /// Exact number of compressed bytes to read before decoding
    expected_len: usize,

    /// Largest slice handed to the output per write
    #[arg(long, env = env_vars::CHUNK_SIZE, default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,

    /// Largest read requested from the input per call
    #[arg(long, default_value_t = DEFAULT_READ_SIZE)]
    read_size: usize,

    /// Container format of the payload (raw, zlib, gzip, auto)
    #[arg(long, env = env_vars::FORMAT, default_value = "raw")]
    format: InflateFormat,

    /// Fail if the decompressed payload exceeds this many bytes
    #[arg(long)]
    max_output: Option<usize>,

    /// Fail if any bytes follow the declared length
    #[arg(long)]
    reject_trailing: bool,

    /// Read the payload from a file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print a JSON telemetry line to stderr after a successful run
    #[arg(long)]
    telemetry: bool,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, env = env_vars::LOG, default_value = "warn")]
    log_level: tracing::Level,
}

impl Cli {
    fn config(&self) -> HarnessConfig {
        HarnessConfig::new(
            Some(self.chunk_size),
            Some(self.read_size),
            Some(self.format),
            self.max_output,
            Some(self.reject_trailing),
        )
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries payload bytes only; logs go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let config = cli.config();
    let snapshot = run(&cli, &config)?;

    if cli.telemetry {
        emit_telemetry(&snapshot)?;
    }
    Ok(())
}

fn run(cli: &Cli, config: &HarnessConfig) -> Result<TelemetrySnapshot> {
    let input = match &cli.input {
        Some(path) => InputSource::File(path.clone()),
        None => InputSource::Reader(Box::new(io::stdin())),
    };
    let output = match &cli.output {
        Some(path) => OutputSink::File(path.clone()),
        None => OutputSink::Writer(Box::new(io::stdout())),
    };

    let (snapshot, _) = inflate_endpoints(input, output, cli.expected_len, config)
        .context("inflate run failed")?;
    Ok(snapshot)
}

fn emit_telemetry(snapshot: &TelemetrySnapshot) -> Result<()> {
    let line = snapshot.to_json().context("serializing telemetry")?;
    let mut err = io::stderr().lock();
    writeln!(err, "{line}").context("writing telemetry")?;
    Ok(())
}
