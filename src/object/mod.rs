//! Git object framing shared by the store, the tree codec, and the pack
//! resolver.

pub mod commit;
pub mod id;
pub mod tree;

pub use id::ObjectId;

use crate::error::{Error, Result};

/// The four canonical object kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Commit,
    Tree,
    Blob,
    Tag,
}

impl ObjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectKind::Commit => "commit",
            ObjectKind::Tree => "tree",
            ObjectKind::Blob => "blob",
            ObjectKind::Tag => "tag",
        }
    }

    /// Map a pack record kind code (1..=4) to the object kind.
    pub fn from_pack_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(ObjectKind::Commit),
            2 => Some(ObjectKind::Tree),
            3 => Some(ObjectKind::Blob),
            4 => Some(ObjectKind::Tag),
            _ => None,
        }
    }

    fn from_label(label: &[u8]) -> Option<Self> {
        match label {
            b"commit" => Some(ObjectKind::Commit),
            b"tree" => Some(ObjectKind::Tree),
            b"blob" => Some(ObjectKind::Blob),
            b"tag" => Some(ObjectKind::Tag),
            _ => None,
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frame a payload as `"<kind> <size>\0" + payload`.
pub fn frame(kind: ObjectKind, payload: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", kind, payload.len());
    let mut framed = header.into_bytes();
    framed.extend_from_slice(payload);
    framed
}

/// Digest of the framed form: the object's identity.
pub fn hash_framed(kind: ObjectKind, payload: &[u8]) -> ObjectId {
    ObjectId::hash(&frame(kind, payload))
}

/// Split a framed object into its kind and payload.
pub fn parse_frame(framed: &[u8]) -> Result<(ObjectKind, &[u8])> {
    let nul = framed
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::CorruptObject("no NUL after object header".to_string()))?;
    let header = &framed[..nul];

    let space = header
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::CorruptObject("no space in object header".to_string()))?;

    let kind = ObjectKind::from_label(&header[..space]).ok_or_else(|| {
        Error::CorruptObject(format!(
            "unknown object kind {:?}",
            String::from_utf8_lossy(&header[..space])
        ))
    })?;

    let size: usize = std::str::from_utf8(&header[space + 1..])
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::CorruptObject("unparsable size in object header".to_string()))?;

    let payload = &framed[nul + 1..];
    if payload.len() != size {
        return Err(Error::CorruptObject(format!(
            "header claims {} payload bytes, found {}",
            size,
            payload.len()
        )));
    }

    Ok((kind, payload))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_roundtrip() {
        let framed = frame(ObjectKind::Blob, b"hello world\n");
        assert_eq!(&framed[..8], b"blob 12\0");

        let (kind, payload) = parse_frame(&framed).unwrap();
        assert_eq!(kind, ObjectKind::Blob);
        assert_eq!(payload, b"hello world\n");
    }

    #[test]
    fn test_hash_framed_known_value() {
        // git hash-object of a file containing "test\n"
        let id = hash_framed(ObjectKind::Blob, b"test\n");
        assert_eq!(id.to_hex(), "9daeafb9864cf43055ae93beb0afd6c7d144bfa4");
    }

    #[test]
    fn test_parse_frame_rejects_missing_nul() {
        assert!(matches!(
            parse_frame(b"blob 4"),
            Err(Error::CorruptObject(_))
        ));
    }

    #[test]
    fn test_parse_frame_rejects_unknown_kind() {
        assert!(matches!(
            parse_frame(b"sprocket 2\0hi"),
            Err(Error::CorruptObject(_))
        ));
    }

    #[test]
    fn test_parse_frame_rejects_size_mismatch() {
        assert!(matches!(
            parse_frame(b"blob 3\0hi"),
            Err(Error::CorruptObject(_))
        ));
    }

    #[test]
    fn test_pack_codes() {
        assert_eq!(ObjectKind::from_pack_code(1), Some(ObjectKind::Commit));
        assert_eq!(ObjectKind::from_pack_code(2), Some(ObjectKind::Tree));
        assert_eq!(ObjectKind::from_pack_code(3), Some(ObjectKind::Blob));
        assert_eq!(ObjectKind::from_pack_code(4), Some(ObjectKind::Tag));
        assert_eq!(ObjectKind::from_pack_code(5), None);
        assert_eq!(ObjectKind::from_pack_code(6), None);
    }
}
