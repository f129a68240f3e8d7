//! Packet-line framing: four hex length bytes (counting themselves)
//! followed by the payload. `0000` is the flush marker.

use crate::error::{Error, Result};

pub const FLUSH: &[u8] = b"0000";

/// Walk a buffer of packet-lines and return the payloads, with any trailing
/// newline stripped. Flush markers are skipped; the reserved lengths 1-3
/// are rejected.
pub fn parse(data: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut lines = Vec::new();
    let mut pos = 0;

    while pos + 4 <= data.len() {
        let len = std::str::from_utf8(&data[pos..pos + 4])
            .ok()
            .and_then(|s| usize::from_str_radix(s, 16).ok())
            .ok_or_else(|| Error::CorruptPack("packet-line length is not hex".to_string()))?;

        if len == 0 {
            pos += 4;
            continue;
        }
        if len < 4 {
            return Err(Error::CorruptPack(format!(
                "reserved packet-line length {:#06x}",
                len
            )));
        }
        if pos + len > data.len() {
            return Err(Error::CorruptPack(
                "packet-line runs past end of buffer".to_string(),
            ));
        }

        let mut payload = data[pos + 4..pos + len].to_vec();
        if payload.last() == Some(&b'\n') {
            payload.pop();
        }
        lines.push(payload);
        pos += len;
    }

    Ok(lines)
}

/// Length-prefix a payload as one packet-line.
pub fn frame(payload: &[u8]) -> Vec<u8> {
    let mut out = format!("{:04x}", payload.len() + 4).into_bytes();
    out.extend_from_slice(payload);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_shape() {
        assert_eq!(frame(b"want abc\n"), b"000dwant abc\n");
        assert_eq!(frame(b""), b"0004");
    }

    #[test]
    fn test_parse_strips_newline_and_skips_flush() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&frame(b"# service=git-upload-pack\n"));
        buf.extend_from_slice(FLUSH);
        buf.extend_from_slice(&frame(b"line two"));
        buf.extend_from_slice(FLUSH);

        let lines = parse(&buf).unwrap();
        assert_eq!(
            lines,
            vec![b"# service=git-upload-pack".to_vec(), b"line two".to_vec()]
        );
    }

    #[test]
    fn test_parse_rejects_reserved_lengths() {
        assert!(matches!(parse(b"0001"), Err(Error::CorruptPack(_))));
        assert!(matches!(parse(b"0003x"), Err(Error::CorruptPack(_))));
    }

    #[test]
    fn test_parse_rejects_overrun() {
        // Claims 16 bytes but only 8 follow the length.
        assert!(matches!(parse(b"0010too short"), Err(Error::CorruptPack(_))));
    }

    #[test]
    fn test_parse_rejects_non_hex_length() {
        assert!(matches!(parse(b"zzzzpayload"), Err(Error::CorruptPack(_))));
    }

    #[test]
    fn test_roundtrip() {
        let payloads: [&[u8]; 3] = [b"first\n", b"second", b"\x00binary\xff\n"];
        let mut buf = Vec::new();
        for p in payloads {
            buf.extend_from_slice(&frame(p));
        }

        let lines = parse(&buf).unwrap();
        assert_eq!(
            lines,
            vec![b"first".to_vec(), b"second".to_vec(), b"\x00binary\xff".to_vec()]
        );
    }
}
