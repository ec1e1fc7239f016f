//! fs::local
//!
//! [`FileSystem`] backed by the real disk.

use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use super::{has_extension, strip_bom, FileSystem, FsError};

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn list_files_recursive(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>, FsError> {
        let mut found = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = entry.map_err(|e| FsError::Walk {
                path: e.path().unwrap_or(root).to_path_buf(),
                message: e.to_string(),
            })?;
            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                found.push(entry.into_path());
            }
        }
        found.sort();
        trace!(root = %root.display(), count = found.len(), "listed files");
        Ok(found)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        let bytes = std::fs::read(path).map_err(|source| FsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| FsError::InvalidUtf8(path.to_path_buf()))?;
        Ok(strip_bom(text))
    }

    fn write_string(&self, path: &Path, text: &str) -> Result<(), FsError> {
        std::fs::write(path, text).map_err(|source| FsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    fn directory_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn delete_file(&self, path: &Path) -> Result<(), FsError> {
        std::fs::remove_file(path).map_err(|source| FsError::Delete {
            path: path.to_path_buf(),
            source,
        })
    }

    fn delete_directory(&self, path: &Path) -> Result<(), FsError> {
        std::fs::remove_dir(path).map_err(|source| FsError::Delete {
            path: path.to_path_buf(),
            source,
        })
    }

    fn list_children(&self, dir: &Path) -> Result<Vec<String>, FsError> {
        let read_err = |source: std::io::Error| FsError::Read {
            path: dir.to_path_buf(),
            source,
        };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let entry = entry.map_err(read_err)?;
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }
}
