//! Working-tree materializer: writes a stored tree out as real files.

use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::object::{tree, ObjectId, ObjectKind};
use crate::store::Store;

/// Recursively materialize `tree_id` into `dest`, creating directories and
/// writing blobs as regular files. Pre-existing files are overwritten.
pub fn checkout(store: &Store, tree_id: &ObjectId, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;

    let (kind, payload) = store.read(tree_id)?;
    if kind != ObjectKind::Tree {
        return Err(Error::CorruptObject(format!(
            "expected tree at {}, found {}",
            tree_id, kind
        )));
    }

    for entry in tree::parse_tree(&payload)? {
        let path = dest.join(OsStr::from_bytes(&entry.name));
        if entry.is_dir() {
            checkout(store, &entry.id, &path)?;
        } else {
            let (_, contents) = store.read(&entry.id)?;
            fs::write(&path, contents)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_checkout_roundtrips_write_tree() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");

        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("top.txt"), b"top contents").unwrap();
        fs::write(src.join("nested").join("deep.bin"), [0u8, 1, 2, 255]).unwrap();

        let store = Store::new(temp.path().join(".git"));
        store.init_layout().unwrap();

        let tree_id = tree::write_tree(&store, &src).unwrap();
        checkout(&store, &tree_id, &dest).unwrap();

        assert_eq!(fs::read(dest.join("top.txt")).unwrap(), b"top contents");
        assert_eq!(
            fs::read(dest.join("nested").join("deep.bin")).unwrap(),
            [0u8, 1, 2, 255]
        );
    }

    #[test]
    fn test_checkout_missing_blob_fails() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join(".git"));
        store.init_layout().unwrap();

        // Tree referencing a blob that was never stored.
        let ghost = ObjectId::hash(b"ghost");
        let payload = tree::encode_entries(&[tree::TreeEntry {
            mode: tree::MODE_FILE.to_string(),
            name: b"gone.txt".to_vec(),
            id: ghost,
        }]);
        let tree_id = store.write(ObjectKind::Tree, &payload).unwrap();

        let err = checkout(&store, &tree_id, &temp.path().join("out")).unwrap_err();
        assert!(matches!(err, Error::Missing(_)));
    }

    #[test]
    fn test_checkout_overwrites_existing_files() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let dest = temp.path().join("dest");

        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("file.txt"), b"fresh").unwrap();
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("file.txt"), b"stale").unwrap();

        let store = Store::new(temp.path().join(".git"));
        store.init_layout().unwrap();

        let tree_id = tree::write_tree(&store, &src).unwrap();
        checkout(&store, &tree_id, &dest).unwrap();

        assert_eq!(fs::read(dest.join("file.txt")).unwrap(), b"fresh");
    }
}
