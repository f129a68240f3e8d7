//! Handle the cat-file command - print an object's payload

use std::io::Write;

use anyhow::Result;

use crate::object::ObjectId;
use crate::store::Store;

/// Write the payload bytes exactly as stored; no trailing newline is added.
pub fn handle<W: Write>(store: &Store, digest: &str, output: &mut W) -> Result<()> {
    let id = ObjectId::from_hex(digest)?;
    let (_, payload) = store.read(&id)?;
    output.write_all(&payload)?;
    Ok(())
}
