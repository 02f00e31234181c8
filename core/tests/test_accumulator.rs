#[cfg(test)]
mod tests {
    use std::io::{self, Cursor, Read};

    use inflate_harness_core::stream::{accumulate, AccumulateError, InputAccumulator};
    use proptest::prelude::*;

    /// Reader that hands out `data` in the fragment sizes listed in `cuts`,
    /// then whatever is left in one piece.
    struct FragmentReader {
        data: Vec<u8>,
        pos: usize,
        cuts: Vec<usize>,
        reads: usize,
    }

    impl FragmentReader {
        fn new(data: Vec<u8>, cuts: Vec<usize>) -> Self {
            Self { data, pos: 0, cuts, reads: 0 }
        }
    }

    impl Read for FragmentReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let left = self.data.len() - self.pos;
            let cut = self.cuts.get(self.reads).copied().unwrap_or(left).max(1);
            self.reads += 1;
            let n = cut.min(left).min(buf.len());
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Fails with `Interrupted` on every other call.
    struct InterruptingReader {
        inner: Cursor<Vec<u8>>,
        flip: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.flip = !self.flip;
            if self.flip {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            self.inner.read(buf)
        }
    }

    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }
    }

    #[test]
    fn accept_until_complete() {
        let mut acc = InputAccumulator::new(6);
        assert!(!acc.is_complete());
        acc.accept(b"ab").unwrap();
        acc.accept(b"").unwrap();
        acc.accept(b"cdef").unwrap();
        assert!(acc.is_complete());
        assert_eq!(acc.remaining(), 0);
        assert_eq!(acc.fragments(), 3);
        assert_eq!(&acc.into_bytes().unwrap()[..], b"abcdef");
    }

    #[test]
    fn zero_expected_is_complete_immediately() {
        let acc = InputAccumulator::new(0);
        assert!(acc.is_complete());
        assert!(acc.into_bytes().unwrap().is_empty());
    }

    #[test]
    fn overflow_rejected_without_touching_buffer() {
        let mut acc = InputAccumulator::new(4);
        acc.accept(b"abc").unwrap();
        let err = acc.accept(b"de").unwrap_err();
        assert!(matches!(err, AccumulateError::Overflow { expected: 4, received: 5 }));
        assert_eq!(acc.len(), 3);
        assert_eq!(acc.fragments(), 1);

        acc.accept(b"d").unwrap();
        assert_eq!(&acc.into_bytes().unwrap()[..], b"abcd");
    }

    #[test]
    fn into_bytes_before_complete_fails() {
        let mut acc = InputAccumulator::new(10);
        acc.accept(b"12345").unwrap();
        let err = acc.into_bytes().unwrap_err();
        assert!(matches!(err, AccumulateError::Incomplete { expected: 10, received: 5 }));
    }

    #[test]
    fn accumulate_stops_at_expected_length() {
        let mut reader = Cursor::new(b"hello world".to_vec());
        let acc = accumulate(&mut reader, 5, 1024, false).unwrap();
        assert_eq!(&acc.into_bytes().unwrap()[..], b"hello");
        // The rest is still in the reader.
        assert_eq!(reader.position(), 5);
    }

    #[test]
    fn accumulate_zero_expected_does_not_read() {
        let mut reader = BrokenReader;
        let acc = accumulate(&mut reader, 0, 1024, false).unwrap();
        assert!(acc.is_complete());
        assert_eq!(acc.fragments(), 0);
    }

    #[test]
    fn accumulate_short_input_is_truncated() {
        let mut reader = Cursor::new(vec![1u8; 7]);
        let err = accumulate(&mut reader, 10, 4, false).unwrap_err();
        assert!(matches!(err, AccumulateError::Truncated { expected: 10, received: 7 }));
    }

    #[test]
    fn accumulate_reject_trailing() {
        let mut reader = Cursor::new(vec![9u8; 12]);
        let err = accumulate(&mut reader, 10, 4, true).unwrap_err();
        assert!(matches!(err, AccumulateError::Overflow { expected: 10, .. }));

        let mut exact = Cursor::new(vec![9u8; 10]);
        let acc = accumulate(&mut exact, 10, 4, true).unwrap();
        assert!(acc.is_complete());
    }

    #[test]
    fn accumulate_retries_interrupted_reads() {
        let mut reader = InterruptingReader { inner: Cursor::new(b"abcdefgh".to_vec()), flip: false };
        let acc = accumulate(&mut reader, 8, 3, false).unwrap();
        assert_eq!(acc.fragments(), 3);
        assert_eq!(&acc.into_bytes().unwrap()[..], b"abcdefgh");
    }

    #[test]
    fn accumulate_surfaces_read_errors() {
        let err = accumulate(&mut BrokenReader, 3, 16, false).unwrap_err();
        match err {
            AccumulateError::Read { received, source } => {
                assert_eq!(received, 0);
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn read_size_bounds_each_fragment() {
        let data: Vec<u8> = (0..100u8).collect();
        let mut reader = Cursor::new(data.clone());
        let acc = accumulate(&mut reader, 100, 7, false).unwrap();
        // ceil(100 / 7)
        assert_eq!(acc.fragments(), 15);
        assert_eq!(&acc.into_bytes().unwrap()[..], &data[..]);
    }

    // Property-based: fragment boundaries never change the accumulated bytes
    proptest! {
        #[test]
        fn prop_fragmentation_invariant(
            data in proptest::collection::vec(any::<u8>(), 0..2048),
            cuts in proptest::collection::vec(1usize..300, 0..16),
        ) {
            let len = data.len();
            let mut reader = FragmentReader::new(data.clone(), cuts);
            let acc = accumulate(&mut reader, len, 64 * 1024, false).unwrap();
            prop_assert!(acc.is_complete());
            prop_assert_eq!(&acc.into_bytes().unwrap()[..], &data[..]);
        }
    }
}
