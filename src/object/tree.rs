//! Tree objects: ordered binary entries naming blobs and sub-trees.
//!
//! Entry names are raw byte strings; nothing here assumes UTF-8.

use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use crate::error::{Error, Result};
use crate::object::id::RAW_LEN;
use crate::object::{ObjectId, ObjectKind};
use crate::store::Store;

pub const MODE_FILE: &str = "100644";
pub const MODE_DIR: &str = "40000";

/// One `<mode> <name>\0<20-raw-digest>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: String,
    pub name: Vec<u8>,
    pub id: ObjectId,
}

impl TreeEntry {
    pub fn is_dir(&self) -> bool {
        self.mode == MODE_DIR
    }
}

/// Serialize entries, already in sort order, into a tree payload.
pub fn encode_entries(entries: &[TreeEntry]) -> Vec<u8> {
    let mut payload = Vec::new();
    for entry in entries {
        payload.extend_from_slice(entry.mode.as_bytes());
        payload.push(b' ');
        payload.extend_from_slice(&entry.name);
        payload.push(0);
        payload.extend_from_slice(entry.id.as_bytes());
    }
    payload
}

/// Parse a tree payload into entries. A trailing partial entry is corrupt.
pub fn parse_tree(payload: &[u8]) -> Result<Vec<TreeEntry>> {
    let mut entries = Vec::new();
    let mut pos = 0;

    while pos < payload.len() {
        let space = payload[pos..]
            .iter()
            .position(|&b| b == b' ')
            .ok_or_else(|| Error::CorruptTree("entry truncated before mode".to_string()))?;
        let mode = std::str::from_utf8(&payload[pos..pos + space])
            .map_err(|_| Error::CorruptTree("non-ascii mode".to_string()))?
            .to_string();
        pos += space + 1;

        let nul = payload[pos..]
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::CorruptTree("entry truncated before name".to_string()))?;
        let name = payload[pos..pos + nul].to_vec();
        pos += nul + 1;

        let id = ObjectId::from_raw_prefix(&payload[pos..])
            .map_err(|_| Error::CorruptTree("entry truncated before digest".to_string()))?;
        pos += RAW_LEN;

        entries.push(TreeEntry { mode, name, id });
    }

    Ok(entries)
}

/// Recursively encode `dir` as a tree object, writing every file as a blob
/// and every subdirectory as a nested tree.
///
/// The entry named like the repository root directory is excluded, as are
/// kinds other than regular files and directories.
pub fn write_tree(store: &Store, dir: &Path) -> Result<ObjectId> {
    let repo_dir_name = store.git_dir().file_name().map(|n| n.to_os_string());
    let mut entries = Vec::new();

    for dirent in fs::read_dir(dir)? {
        let dirent = dirent?;
        let name = dirent.file_name();
        if Some(name.as_os_str()) == repo_dir_name.as_deref() {
            continue;
        }

        let file_type = dirent.file_type()?;
        if file_type.is_dir() {
            let id = write_tree(store, &dirent.path())?;
            entries.push(TreeEntry {
                mode: MODE_DIR.to_string(),
                name: name.as_bytes().to_vec(),
                id,
            });
        } else if file_type.is_file() {
            let id = store.write(ObjectKind::Blob, &fs::read(dirent.path())?)?;
            entries.push(TreeEntry {
                mode: MODE_FILE.to_string(),
                name: name.as_bytes().to_vec(),
                id,
            });
        }
        // Symlinks and special files are skipped.
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    store.write(ObjectKind::Tree, &encode_entries(&entries))
}
