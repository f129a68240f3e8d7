//! Zlib round-trip helpers shared by the object store and the pack parser.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::{Compression, Decompress, FlushDecompress, Status};

use crate::error::{Error, Result};

const CHUNK: usize = 8 * 1024;

/// Inflate a complete in-memory zlib stream.
pub fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::CorruptStream(e.to_string()))?;
    Ok(out)
}

/// Deflate a complete payload at maximum compression.
pub fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Inflate one zlib stream that starts at `offset` inside a larger buffer.
///
/// Returns the inflated payload together with the number of compressed
/// bytes consumed to reach the stream end, so a pack cursor can advance
/// past this stream to the next record.
pub fn inflate_from(data: &[u8], offset: usize) -> Result<(Vec<u8>, usize)> {
    if offset > data.len() {
        return Err(Error::CorruptStream(format!(
            "stream offset {} past end of buffer ({} bytes)",
            offset,
            data.len()
        )));
    }

    let mut stream = Decompress::new(true);
    let mut out = Vec::with_capacity(CHUNK);

    loop {
        let consumed = stream.total_in() as usize;
        let produced = stream.total_out();
        if out.len() == out.capacity() {
            out.reserve(CHUNK);
        }
        let status = stream
            .decompress_vec(&data[offset + consumed..], &mut out, FlushDecompress::None)
            .map_err(|e| Error::CorruptStream(e.to_string()))?;
        match status {
            Status::StreamEnd => return Ok((out, stream.total_in() as usize)),
            Status::Ok | Status::BufError => {
                // No input eaten and no output made: the stream is truncated.
                if stream.total_in() as usize == consumed && stream.total_out() == produced {
                    return Err(Error::CorruptStream(
                        "deflate stream ended without a stream-end marker".to_string(),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let data = b"the quick brown fox jumps over the lazy dog";
        let compressed = deflate(data).unwrap();
        let inflated = inflate(&compressed).unwrap();
        assert_eq!(inflated, data);
    }

    #[test]
    fn test_inflate_garbage() {
        let err = inflate(b"not a zlib stream").unwrap_err();
        assert!(matches!(err, Error::CorruptStream(_)));
    }

    #[test]
    fn test_inflate_from_reports_consumed() {
        let payload = b"stream payload bytes";
        let compressed = deflate(payload).unwrap();

        // Embed the stream mid-buffer with trailing junk, the way a pack
        // record payload sits between its header and the next record.
        let mut buf = b"prefix--".to_vec();
        let offset = buf.len();
        buf.extend_from_slice(&compressed);
        buf.extend_from_slice(b"trailing junk");

        let (inflated, consumed) = inflate_from(&buf, offset).unwrap();
        assert_eq!(inflated, payload);
        assert_eq!(consumed, compressed.len());
    }

    #[test]
    fn test_inflate_from_truncated() {
        let compressed = deflate(b"some payload that compresses").unwrap();
        let cut = &compressed[..compressed.len() - 4];
        let err = inflate_from(cut, 0).unwrap_err();
        assert!(matches!(err, Error::CorruptStream(_)));
    }

    #[test]
    fn test_inflate_from_offset_out_of_range() {
        let err = inflate_from(b"abc", 10).unwrap_err();
        assert!(matches!(err, Error::CorruptStream(_)));
    }
}
