//! Handle the ls-tree command - list a tree object's entries

use std::io::Write;

use anyhow::Result;

use crate::object::{tree, ObjectId, ObjectKind};
use crate::store::Store;

pub fn handle<W: Write>(
    store: &Store,
    digest: &str,
    name_only: bool,
    output: &mut W,
) -> Result<()> {
    let id = ObjectId::from_hex(digest)?;
    let (kind, payload) = store.read(&id)?;
    if kind != ObjectKind::Tree {
        anyhow::bail!("object {} is a {}, not a tree", id, kind);
    }

    for entry in tree::parse_tree(&payload)? {
        if name_only {
            output.write_all(&entry.name)?;
            output.write_all(b"\n")?;
        } else {
            let entry_kind = if entry.is_dir() { "tree" } else { "blob" };
            write!(output, "{:0>6} {} {}\t", entry.mode, entry_kind, entry.id)?;
            output.write_all(&entry.name)?;
            output.write_all(b"\n")?;
        }
    }

    Ok(())
}
