//! Handle the hash-object command - store a file as a blob

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::object::ObjectKind;
use crate::store::Store;

pub fn handle<W: Write>(store: &Store, file: &Path, output: &mut W) -> Result<()> {
    let contents =
        fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let id = store.write(ObjectKind::Blob, &contents)?;
    writeln!(output, "{}", id)?;
    Ok(())
}
