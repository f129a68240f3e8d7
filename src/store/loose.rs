//! Loose-object store: one zlib-deflated framed object per file under
//! `objects/XX/YYY...`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::object::{self, ObjectId, ObjectKind};
use crate::zlib;

/// Handle on one repository's object store.
///
/// Carries the repository root (normally `.git`) explicitly so callers can
/// point it at temporary directories instead of relying on ambient state.
pub struct Store {
    git_dir: PathBuf,
}

impl Store {
    pub fn new<P: AsRef<Path>>(git_dir: P) -> Self {
        Store {
            git_dir: git_dir.as_ref().to_path_buf(),
        }
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// Create the `objects/` and `refs/` subtrees.
    pub fn init_layout(&self) -> Result<()> {
        fs::create_dir_all(self.git_dir.join("objects"))?;
        fs::create_dir_all(self.git_dir.join("refs"))?;
        Ok(())
    }

    /// Loose objects live at `objects/ab/cdef123...`.
    fn object_path(&self, id: &ObjectId) -> PathBuf {
        let hex = id.to_hex();
        self.git_dir.join("objects").join(&hex[..2]).join(&hex[2..])
    }

    /// Frame, hash, deflate, and write a payload, returning its digest.
    /// Idempotent: an object already on disk is left untouched.
    pub fn write(&self, kind: ObjectKind, payload: &[u8]) -> Result<ObjectId> {
        let framed = object::frame(kind, payload);
        let id = ObjectId::hash(&framed);
        self.write_raw(&id, &framed)?;
        Ok(id)
    }

    /// Write a framed object whose digest the caller has already computed
    /// (the pack resolver path). Silently skips an existing object.
    pub fn write_raw(&self, id: &ObjectId, framed: &[u8]) -> Result<()> {
        let path = self.object_path(id);
        if path.exists() {
            return Ok(());
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&path, zlib::deflate(framed)?)?;
        Ok(())
    }

    /// Read an object back as its kind and payload.
    pub fn read(&self, id: &ObjectId) -> Result<(ObjectKind, Vec<u8>)> {
        let compressed = match fs::read(self.object_path(id)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::Missing(*id));
            }
            Err(e) => return Err(e.into()),
        };
        let framed = zlib::inflate(&compressed)?;
        let (kind, payload) = object::parse_frame(&framed)?;
        Ok((kind, payload.to_vec()))
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.object_path(id).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, Store) {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join(".git"));
        store.init_layout().unwrap();
        (temp, store)
    }

    #[test]
    fn test_write_and_read_roundtrip() {
        let (_temp, store) = store();

        let id = store.write(ObjectKind::Blob, b"Hello, World!").unwrap();
        let (kind, payload) = store.read(&id).unwrap();

        assert_eq!(kind, ObjectKind::Blob);
        assert_eq!(payload, b"Hello, World!");
    }

    #[test]
    fn test_digest_matches_path() {
        let (_temp, store) = store();

        let id = store.write(ObjectKind::Blob, b"test\n").unwrap();
        assert_eq!(id.to_hex(), "9daeafb9864cf43055ae93beb0afd6c7d144bfa4");

        let hex = id.to_hex();
        let path = store
            .git_dir()
            .join("objects")
            .join(&hex[..2])
            .join(&hex[2..]);
        assert!(path.is_file());
    }

    #[test]
    fn test_idempotent_write() {
        let (_temp, store) = store();

        let id1 = store.write(ObjectKind::Blob, b"same content").unwrap();
        let before = fs::read(store.object_path(&id1)).unwrap();

        let id2 = store.write(ObjectKind::Blob, b"same content").unwrap();
        let after = fs::read(store.object_path(&id2)).unwrap();

        assert_eq!(id1, id2);
        assert_eq!(before, after);
    }

    #[test]
    fn test_read_missing() {
        let (_temp, store) = store();
        let absent = ObjectId::hash(b"never written");
        assert!(matches!(store.read(&absent), Err(Error::Missing(_))));
    }

    #[test]
    fn test_write_raw_skips_existing() {
        let (_temp, store) = store();

        let framed = object::frame(ObjectKind::Blob, b"raw path");
        let id = ObjectId::hash(&framed);

        store.write_raw(&id, &framed).unwrap();
        assert!(store.contains(&id));

        // A second write with different bytes must not clobber the object.
        store.write_raw(&id, b"blob 5\0other").unwrap();
        let (_, payload) = store.read(&id).unwrap();
        assert_eq!(payload, b"raw path");
    }
}
