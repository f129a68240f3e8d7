//! Handle the init command - create the repository skeleton

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::store::Store;

pub fn handle<W: Write>(root: &Path, config: &Config, output: &mut W) -> Result<()> {
    let store = Store::new(root.join(".git"));
    store.init_layout()?;
    store.write_head_symref(&format!("refs/heads/{}", config.default_branch))?;

    writeln!(output, "Initialized git directory")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_layout_and_head() {
        let temp = TempDir::new().unwrap();
        let mut out = Vec::new();

        handle(temp.path(), &Config::default(), &mut out).unwrap();

        assert_eq!(out, b"Initialized git directory\n");
        let git_dir = temp.path().join(".git");
        assert!(git_dir.join("objects").is_dir());
        assert!(git_dir.join("refs").is_dir());
        assert_eq!(
            std::fs::read_to_string(git_dir.join("HEAD")).unwrap(),
            "ref: refs/heads/main\n"
        );

        // Both trees start out empty.
        assert_eq!(git_dir.join("objects").read_dir().unwrap().count(), 0);
        assert_eq!(git_dir.join("refs").read_dir().unwrap().count(), 0);
    }
}
