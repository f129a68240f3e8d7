//! Object identity: the SHA-1 digest of an object's framed form.

use sha1::{Digest, Sha1};

use crate::error::{Error, Result};

/// Length of a raw digest in bytes.
pub const RAW_LEN: usize = 20;

/// Length of a hex-encoded digest in characters.
pub const HEX_LEN: usize = 40;

/// 160-bit object identifier. The sole key into the object store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId([u8; RAW_LEN]);

impl ObjectId {
    pub fn from_raw(bytes: [u8; RAW_LEN]) -> Self {
        Self(bytes)
    }

    /// Compute the SHA-1 of arbitrary bytes.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Parse a 40-character hex digest.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != HEX_LEN {
            return Err(Error::BadDigest(s.to_string()));
        }
        let decoded = hex::decode(s).map_err(|_| Error::BadDigest(s.to_string()))?;
        let mut raw = [0u8; RAW_LEN];
        raw.copy_from_slice(&decoded);
        Ok(Self(raw))
    }

    /// Take 20 raw digest bytes from the front of a buffer, as embedded in
    /// tree entries and ref-delta record headers.
    pub fn from_raw_prefix(bytes: &[u8]) -> Result<Self> {
        let raw: [u8; RAW_LEN] = bytes
            .get(..RAW_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| Error::BadDigest(hex::encode(bytes)))?;
        Ok(Self(raw))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; RAW_LEN] {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
