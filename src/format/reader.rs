use std::io::{ErrorKind, Read};

use crate::error::{Error, Result};

/// Little-endian primitive reader over any byte stream.
///
/// Every short read is reported as `TruncatedFile` with the name of the
/// field or record being read; nothing is zero-padded.
pub struct RecordReader<R> {
    inner: R,
    consumed: u64,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R) -> RecordReader<R> {
        RecordReader { inner, consumed: 0 }
    }

    /// Total bytes read so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    pub fn read_u32(&mut self, what: &str) -> Result<u32> {
        let mut buf4 = [0u8; 4];
        self.read_exact(&mut buf4, what)?;
        Ok(u32::from_le_bytes(buf4))
    }

    pub fn read_i32(&mut self, what: &str) -> Result<i32> {
        let mut buf4 = [0u8; 4];
        self.read_exact(&mut buf4, what)?;
        Ok(i32::from_le_bytes(buf4))
    }

    /// Reads `count` little-endian `f32` values.
    ///
    /// The buffer grows as bytes arrive, so a header claiming an absurd
    /// count fails on the short read instead of allocating up front.
    pub fn read_f32s(&mut self, count: usize, what: &str) -> Result<Vec<f32>> {
        let expected = count.checked_mul(4).ok_or_else(|| Error::TruncatedFile {
            record: what.to_owned(),
            expected: usize::MAX,
            got: 0,
        })?;
        let mut bytes = Vec::new();
        let got = (&mut self.inner)
            .take(expected as u64)
            .read_to_end(&mut bytes)?;
        self.consumed += got as u64;
        if got < expected {
            return Err(Error::TruncatedFile {
                record: what.to_owned(),
                expected,
                got,
            });
        }
        Ok(bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Drains the stream and returns how many bytes were left.
    pub fn remaining(&mut self) -> Result<u64> {
        let n = std::io::copy(&mut self.inner, &mut std::io::sink())?;
        self.consumed += n;
        Ok(n)
    }

    fn read_exact(&mut self, buf: &mut [u8], what: &str) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(Error::TruncatedFile {
                        record: what.to_owned(),
                        expected: buf.len(),
                        got: filled,
                    })
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.consumed += filled as u64;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_little_endian() {
        let mut bytes = 0x67676d6cu32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&(-2i32).to_le_bytes());
        bytes.extend_from_slice(&1.5f32.to_le_bytes());
        let mut r = RecordReader::new(Cursor::new(bytes));
        assert_eq!(r.read_u32("magic").unwrap(), 0x67676d6c);
        assert_eq!(r.read_i32("n_dims").unwrap(), -2);
        assert_eq!(r.read_f32s(1, "payload").unwrap(), vec![1.5]);
        assert_eq!(r.consumed(), 12);
        assert_eq!(r.remaining().unwrap(), 0);
    }

    #[test]
    fn short_header_is_truncated() {
        let mut r = RecordReader::new(Cursor::new(vec![1u8, 2]));
        match r.read_u32("magic") {
            Err(Error::TruncatedFile { record, expected, got }) => {
                assert_eq!(record, "magic");
                assert_eq!(expected, 4);
                assert_eq!(got, 2);
            }
            other => panic!("expected TruncatedFile, got {:?}", other),
        }
    }

    #[test]
    fn short_payload_is_truncated() {
        let mut r = RecordReader::new(Cursor::new(vec![0u8; 10]));
        assert!(matches!(
            r.read_f32s(3, "fc1w"),
            Err(Error::TruncatedFile { expected: 12, got: 10, .. })
        ));
    }

    #[test]
    fn huge_count_fails_without_allocating() {
        let mut r = RecordReader::new(Cursor::new(vec![0u8; 8]));
        assert!(matches!(
            r.read_f32s(1 << 40, "fc1w"),
            Err(Error::TruncatedFile { got: 8, .. })
        ));
    }
}
