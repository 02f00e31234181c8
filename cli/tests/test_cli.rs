#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::process::{Command, Output, Stdio};

    use flate2::write::{DeflateEncoder, GzEncoder};
    use flate2::Compression;

    fn bin() -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_inflate-harness"));
        cmd.env_remove("INFLATE_HARNESS_CHUNK_SIZE")
            .env_remove("INFLATE_HARNESS_FORMAT")
            .env_remove("INFLATE_HARNESS_LOG");
        cmd
    }

    fn run_with_stdin(mut cmd: Command, stdin: &[u8]) -> Output {
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn inflate-harness");
        {
            let mut pipe = child.stdin.take().expect("stdin pipe");
            // The harness may exit before reading everything; ignore EPIPE here.
            let _ = pipe.write_all(stdin);
        }
        child.wait_with_output().expect("wait for inflate-harness")
    }

    fn sample(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 97) as u8).collect()
    }

    fn deflate_raw(data: &[u8]) -> Vec<u8> {
        let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
        enc.write_all(data).unwrap();
        enc.finish().unwrap()
    }

    #[test]
    fn inflates_stdin_to_stdout() {
        let plain = sample(100_000);
        let compressed = deflate_raw(&plain);

        let mut cmd = bin();
        cmd.arg(compressed.len().to_string());
        let out = run_with_stdin(cmd, &compressed);

        assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
        assert_eq!(out.stdout, plain);
    }

    #[test]
    fn large_chunk_size_keeps_every_byte() {
        let plain = sample(300_000);
        let compressed = deflate_raw(&plain);

        for chunk in ["1", "4096", "1048576"] {
            let mut cmd = bin();
            cmd.args([compressed.len().to_string().as_str(), "--chunk-size", chunk]);
            let out = run_with_stdin(cmd, &compressed);
            assert!(out.status.success(), "chunk {chunk}");
            assert_eq!(out.stdout.len(), plain.len(), "chunk {chunk}");
            assert_eq!(out.stdout, plain, "chunk {chunk}");
        }
    }

    #[test]
    fn chunk_size_from_environment() {
        let plain = sample(5_000);
        let compressed = deflate_raw(&plain);

        let mut cmd = bin();
        cmd.env("INFLATE_HARNESS_CHUNK_SIZE", "7").arg(compressed.len().to_string());
        let out = run_with_stdin(cmd, &compressed);
        assert!(out.status.success());
        assert_eq!(out.stdout, plain);
    }

    #[test]
    fn empty_input_with_zero_length_succeeds() {
        let mut cmd = bin();
        cmd.arg("0");
        let out = run_with_stdin(cmd, b"");
        assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
        assert!(out.stdout.is_empty());
    }

    #[test]
    fn malformed_input_fails_without_output() {
        let garbage = vec![0xffu8; 32];
        let mut cmd = bin();
        cmd.arg("32");
        let out = run_with_stdin(cmd, &garbage);
        assert!(!out.status.success());
        assert!(out.stdout.is_empty());
        assert!(String::from_utf8_lossy(&out.stderr).contains("malformed"));
    }

    #[test]
    fn short_input_is_length_mismatch() {
        let compressed = deflate_raw(&sample(1_000));
        let mut cmd = bin();
        cmd.arg((compressed.len() + 1).to_string());
        let out = run_with_stdin(cmd, &compressed);
        assert!(!out.status.success());
        assert!(out.stdout.is_empty());
        assert!(String::from_utf8_lossy(&out.stderr).contains("length mismatch"));
    }

    #[test]
    fn gzip_with_auto_format_and_telemetry() {
        let plain = sample(20_000);
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(&plain).unwrap();
        let compressed = enc.finish().unwrap();

        let mut cmd = bin();
        cmd.args([compressed.len().to_string().as_str(), "--format", "auto", "--telemetry"]);
        let out = run_with_stdin(cmd, &compressed);

        assert!(out.status.success());
        assert_eq!(out.stdout, plain);
        let stderr = String::from_utf8_lossy(&out.stderr);
        assert!(stderr.contains("\"decode_calls\":1"), "stderr: {stderr}");
        assert!(stderr.contains(&format!("\"bytes_out\":{}", plain.len())));
    }

    #[test]
    fn missing_length_is_usage_error() {
        let out = run_with_stdin(bin(), b"");
        assert_eq!(out.status.code(), Some(2));
        assert!(out.stdout.is_empty());
    }

    #[test]
    fn non_numeric_length_is_usage_error() {
        let mut cmd = bin();
        cmd.arg("twelve");
        let out = run_with_stdin(cmd, b"");
        assert_eq!(out.status.code(), Some(2));
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let mut cmd = bin();
        cmd.args(["0", "--chunk-size", "0"]);
        let out = run_with_stdin(cmd, b"");
        assert!(!out.status.success());
        assert!(String::from_utf8_lossy(&out.stderr).contains("chunk size"));
    }
}
