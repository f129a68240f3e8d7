//! Handle the commit-tree command - write a commit object

use std::io::Write;

use anyhow::Result;

use crate::config::Config;
use crate::error::Error;
use crate::object::{commit, ObjectId, ObjectKind};
use crate::store::Store;

pub fn handle<W: Write>(
    store: &Store,
    config: &Config,
    tree: &str,
    parent: Option<&str>,
    message: &str,
    output: &mut W,
) -> Result<()> {
    if message.is_empty() {
        return Err(Error::BadArguments("empty commit message".to_string()).into());
    }

    let tree = ObjectId::from_hex(tree)?;
    let parents = match parent {
        Some(hex) => vec![ObjectId::from_hex(hex)?],
        None => Vec::new(),
    };

    let payload = commit::compose(&tree, &parents, &config.author, &config.committer, message);
    let id = store.write(ObjectKind::Commit, &payload)?;
    writeln!(output, "{}", id)?;
    Ok(())
}
