//! HEAD and branch reference files.

use std::fs;

use crate::error::Result;
use crate::object::ObjectId;

use super::Store;

/// Contents of `HEAD`: a symbolic pointer at a ref, or a bare digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    Symbolic(String),
    Detached(ObjectId),
}

impl Store {
    /// Point `HEAD` at a ref name, e.g. `refs/heads/main`.
    pub fn write_head_symref(&self, refname: &str) -> Result<()> {
        fs::write(self.git_dir().join("HEAD"), format!("ref: {}\n", refname))?;
        Ok(())
    }

    /// Detach `HEAD` directly onto a digest.
    pub fn write_head_detached(&self, id: &ObjectId) -> Result<()> {
        fs::write(self.git_dir().join("HEAD"), format!("{}\n", id))?;
        Ok(())
    }

    /// Write a ref file, creating intermediate directories as needed.
    pub fn write_ref(&self, refname: &str, id: &ObjectId) -> Result<()> {
        let path = self.git_dir().join(refname);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, format!("{}\n", id))?;
        Ok(())
    }

    pub fn read_head(&self) -> Result<Head> {
        let contents = fs::read_to_string(self.git_dir().join("HEAD"))?;
        let contents = contents.trim();
        if let Some(refname) = contents.strip_prefix("ref: ") {
            Ok(Head::Symbolic(refname.to_string()))
        } else {
            Ok(Head::Detached(ObjectId::from_hex(contents)?))
        }
    }

    /// Follow `HEAD` to the digest it names, through the branch file when
    /// symbolic.
    pub fn resolve_head(&self) -> Result<ObjectId> {
        match self.read_head()? {
            Head::Detached(id) => Ok(id),
            Head::Symbolic(refname) => {
                let contents = fs::read_to_string(self.git_dir().join(&refname))?;
                ObjectId::from_hex(contents.trim())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::TempDir;

    fn store() -> (TempDir, Store) {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join(".git"));
        store.init_layout().unwrap();
        (temp, store)
    }

    #[test]
    fn test_symbolic_head() {
        let (_temp, store) = store();
        let id = ObjectId::hash(b"commit bytes");

        store.write_head_symref("refs/heads/main").unwrap();
        store.write_ref("refs/heads/main", &id).unwrap();

        assert_eq!(
            store.read_head().unwrap(),
            Head::Symbolic("refs/heads/main".to_string())
        );
        assert_eq!(store.resolve_head().unwrap(), id);

        let raw = fs::read_to_string(store.git_dir().join("HEAD")).unwrap();
        assert_eq!(raw, "ref: refs/heads/main\n");
    }

    #[test]
    fn test_detached_head() {
        let (_temp, store) = store();
        let id = ObjectId::hash(b"detached");

        store.write_head_detached(&id).unwrap();

        assert_eq!(store.read_head().unwrap(), Head::Detached(id));
        assert_eq!(store.resolve_head().unwrap(), id);
    }

    #[test]
    fn test_malformed_head_is_bad_digest() {
        let (_temp, store) = store();
        fs::write(store.git_dir().join("HEAD"), "not a head\n").unwrap();
        assert!(matches!(store.read_head(), Err(Error::BadDigest(_))));
    }
}
