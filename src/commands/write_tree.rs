//! Handle the write-tree command - encode a directory as a tree object

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::object::tree;
use crate::store::Store;

pub fn handle<W: Write>(store: &Store, dir: &Path, output: &mut W) -> Result<()> {
    let id = tree::write_tree(store, dir)?;
    writeln!(output, "{}", id)?;
    Ok(())
}
