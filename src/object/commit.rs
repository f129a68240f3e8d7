//! Commit objects: canonical header lines plus a free-form message.

use crate::error::{Error, Result};
use crate::object::ObjectId;

/// Compose a commit payload from its parts.
///
/// `author` and `committer` are complete identity lines
/// (`Name <email> <timestamp> <zone>`); the message gets a trailing newline.
pub fn compose(
    tree: &ObjectId,
    parents: &[ObjectId],
    author: &str,
    committer: &str,
    message: &str,
) -> Vec<u8> {
    let mut text = format!("tree {}\n", tree);
    for parent in parents {
        text.push_str(&format!("parent {}\n", parent));
    }
    text.push_str(&format!("author {}\n", author));
    text.push_str(&format!("committer {}\n", committer));
    text.push('\n');
    text.push_str(message);
    text.push('\n');
    text.into_bytes()
}

/// Extract the `tree` pointer from a commit payload.
pub fn tree_id(payload: &[u8]) -> Result<ObjectId> {
    for line in payload.split(|&b| b == b'\n') {
        if line.is_empty() {
            // Blank line ends the headers; the message follows.
            break;
        }
        if let Some(hex) = line.strip_prefix(b"tree ") {
            let hex = std::str::from_utf8(hex)
                .map_err(|_| Error::CorruptObject("non-ascii tree header".to_string()))?;
            return ObjectId::from_hex(hex);
        }
    }
    Err(Error::CorruptObject(
        "commit has no tree header".to_string(),
    ))
}
