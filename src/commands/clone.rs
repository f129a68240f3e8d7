//! Handle the clone command - full Smart-HTTP clone into a fresh directory

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::Config;
use crate::object::{self, commit, ObjectKind};
use crate::pack;
use crate::store::Store;
use crate::transport::{self, HttpClient};
use crate::worktree;

/// Discover the remote head, download and explode its pack, set HEAD, and
/// check out the working tree.
pub fn handle(config: &Config, url: &str, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;
    let store = Store::new(dest.join(".git"));
    store.init_layout()?;
    fs::create_dir_all(store.git_dir().join("refs").join("heads"))?;

    let http = HttpClient::new(config)?;
    let head = transport::discover(&http, url)?;
    tracing::info!("cloning {} at {}", url, head.id);

    let pack_data = transport::fetch_pack(&http, url, &head.id)?;
    let records = pack::parse_pack(&pack_data)?;
    let objects = pack::resolve(records)?;
    tracing::info!("unpacked {} objects", objects.len());

    for obj in &objects {
        let framed = object::frame(obj.kind, &obj.data);
        store.write_raw(&obj.id, &framed)?;
    }

    match &head.refname {
        Some(refname) => {
            store.write_head_symref(refname)?;
            store.write_ref(refname, &head.id)?;
        }
        None => store.write_head_detached(&head.id)?,
    }

    let (kind, payload) = store.read(&head.id)?;
    if kind != ObjectKind::Commit {
        anyhow::bail!("head object {} is a {}, not a commit", head.id, kind);
    }
    let tree_id = commit::tree_id(&payload)?;
    worktree::checkout(&store, &tree_id, dest)?;

    Ok(())
}
