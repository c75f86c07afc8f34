//! Local filesystem adapter using std::fs.
//!
//! Writes go to a temporary file next to the destination and are moved into
//! place with a single rename, so readers see either the old file or the
//! complete new one. The temporary file is removed on every error path.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use stackform_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{StackformError, StackformResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> StackformResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> StackformResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)
            .map_err(|e| map_io_error(path, e, "create temporary file"))?;
        debug!(temp = %file.path().display(), "Staging artifact");

        file.write_all(content.as_bytes())
            .map_err(|e| map_io_error(path, e, "write file"))?;
        file.as_file()
            .sync_all()
            .map_err(|e| map_io_error(path, e, "flush file"))?;

        // Temp files are created 0600; keep an existing file's mode, else 0644.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(path)
                .map(|m| m.permissions().mode())
                .unwrap_or(0o644);
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(mode))
                .map_err(|e| map_io_error(path, e, "set permissions"))?;
        }

        file.persist(path)
            .map_err(|e| map_io_error(path, e.error, "replace file"))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> StackformError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<_> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn writes_and_replaces_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vpc_new.yaml");
        let fs = LocalFilesystem::new();

        fs.write_file(&path, "first\n").unwrap();
        fs.write_file(&path, "second\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second\n");
        assert_eq!(entries(temp.path()), ["vpc_new.yaml"]);
    }

    #[test]
    fn failed_write_leaves_nothing_behind() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing").join("vpc_new.yaml");

        let err = LocalFilesystem::new().write_file(&path, "x").unwrap_err();

        assert!(matches!(
            err,
            StackformError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(entries(temp.path()).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn new_files_are_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("vpc_new.yaml");
        LocalFilesystem::new().write_file(&path, "x").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn create_dir_all_then_exists() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        let fs = LocalFilesystem::new();

        assert!(!fs.exists(&nested));
        fs.create_dir_all(&nested).unwrap();
        assert!(fs.exists(&nested));
    }
}
