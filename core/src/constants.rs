/// Defaults when Option<T> is None
pub const DEFAULT_CHUNK_SIZE: usize = 512; // bytes per output write
/// Upper bound on a single input read request.
pub const DEFAULT_READ_SIZE: usize = 64 * 1024; // 64 KiB
/// Max chunk size sanity bound (32 MiB).
pub const MAX_CHUNK_SIZE: usize = 32 * 1024 * 1024;

/// Initial spare capacity handed to the inflater when the input gives no hint.
pub const MIN_OUTPUT_RESERVE: usize = 4 * 1024;

/// Environment variables read by the command-line front end.
pub mod env_vars {
    pub const CHUNK_SIZE: &str = "INFLATE_HARNESS_CHUNK_SIZE";
    pub const FORMAT: &str     = "INFLATE_HARNESS_FORMAT";
    pub const LOG: &str        = "INFLATE_HARNESS_LOG";
}

/// Magic bytes used by format sniffing.
pub mod magic {
    pub const GZIP: [u8; 2] = [0x1f, 0x8b];
    /// zlib CM value for DEFLATE.
    pub const ZLIB_CM_DEFLATE: u8 = 8;
}
