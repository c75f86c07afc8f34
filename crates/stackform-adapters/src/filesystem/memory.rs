//! In-memory filesystem adapter for testing.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use stackform_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StackformError, StackformResult},
};

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted.
    pub fn list_files(&self) -> Vec<PathBuf> {
        self.inner
            .read()
            .map(|inner| inner.files.keys().cloned().collect())
            .unwrap_or_default()
    }
}

fn poisoned() -> StackformError {
    StackformError::Internal {
        message: "memory filesystem lock poisoned".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> StackformResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> StackformResult<()> {
        let mut inner = self.inner.write().map_err(|_| poisoned())?;

        // Ensure parent exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner
            .read()
            .map(|inner| inner.files.contains_key(path) || inner.directories.contains(path))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        let path = Path::new("out/vpc_new.yaml");

        assert!(fs.write_file(path, "x").is_err());
        assert!(fs.list_files().is_empty());

        fs.create_dir_all(Path::new("out")).unwrap();
        fs.write_file(path, "x").unwrap();
        assert_eq!(fs.read_file(path).as_deref(), Some("x"));
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();
        fs.write_file(Path::new("vpc_new.yaml"), "x").unwrap();
        assert!(other.exists(Path::new("vpc_new.yaml")));
    }
}
