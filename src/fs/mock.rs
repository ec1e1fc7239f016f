//! fs::mock
//!
//! In-memory filesystem for deterministic testing.
//!
//! # Design
//!
//! `MemoryFs` keeps files and directories in ordered maps and records every
//! mutating call, so tests can assert both the resulting tree and the exact
//! sequence of writes and deletes (or their absence in a dry run).
//!
//! # Example
//!
//! ```
//! use attrshift::fs::{FileSystem, MemoryFs};
//! use std::path::Path;
//!
//! let fs = MemoryFs::new();
//! fs.add_file("/src/App/App.csproj", "<Project Sdk=\"Microsoft.NET.Sdk\">\n");
//!
//! assert!(fs.directory_exists(Path::new("/src/App")));
//! let found = fs.list_files_recursive(Path::new("/src"), "csproj").unwrap();
//! assert_eq!(found.len(), 1);
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use super::{has_extension, strip_bom, FileSystem, FsError};

/// In-memory filesystem.
///
/// Clones share the same tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    inner: Arc<Mutex<MemoryFsInner>>,
}

#[derive(Debug, Default)]
struct MemoryFsInner {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    operations: Vec<FsOperation>,
    fail_writes: bool,
}

/// A recorded mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsOperation {
    Write(PathBuf),
    DeleteFile(PathBuf),
    DeleteDirectory(PathBuf),
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryFsInner> {
        // A poisoned lock only means another test thread panicked.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add a file, creating its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, contents: &str) {
        let path = path.as_ref();
        let mut inner = self.lock();
        if let Some(parent) = path.parent() {
            add_dir_chain(&mut inner.dirs, parent);
        }
        inner.files.insert(path.to_path_buf(), contents.to_string());
    }

    /// Add an empty directory and its parents.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        add_dir_chain(&mut self.lock().dirs, path.as_ref());
    }

    /// Contents of a file, if present.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock().files.get(path.as_ref()).cloned()
    }

    /// Every mutating call so far, in order.
    pub fn operations(&self) -> Vec<FsOperation> {
        self.lock().operations.clone()
    }

    /// Make every subsequent write fail.
    pub fn fail_writes(&self) {
        self.lock().fail_writes = true;
    }
}

fn add_dir_chain(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors() {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

fn not_found(path: &Path) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} not found", path.display()),
    )
}

impl FileSystem for MemoryFs {
    fn list_files_recursive(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>, FsError> {
        let inner = self.lock();
        if !inner.dirs.contains(root) {
            return Err(FsError::NotFound(root.to_path_buf()));
        }
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(root) && has_extension(p, extension))
            .cloned()
            .collect())
    }

    fn read_to_string(&self, path: &Path) -> Result<String, FsError> {
        self.lock()
            .files
            .get(path)
            .cloned()
            .map(strip_bom)
            .ok_or_else(|| FsError::Read {
                path: path.to_path_buf(),
                source: not_found(path),
            })
    }

    fn write_string(&self, path: &Path, text: &str) -> Result<(), FsError> {
        let mut inner = self.lock();
        let parent_missing = path
            .parent()
            .is_some_and(|p| !p.as_os_str().is_empty() && !inner.dirs.contains(p));
        if inner.fail_writes || parent_missing {
            return Err(FsError::Write {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "write refused"),
            });
        }
        inner.files.insert(path.to_path_buf(), text.to_string());
        inner.operations.push(FsOperation::Write(path.to_path_buf()));
        Ok(())
    }

    fn directory_exists(&self, path: &Path) -> bool {
        self.lock().dirs.contains(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        self.lock().files.contains_key(path)
    }

    fn delete_file(&self, path: &Path) -> Result<(), FsError> {
        let mut inner = self.lock();
        if inner.files.remove(path).is_none() {
            return Err(FsError::Delete {
                path: path.to_path_buf(),
                source: not_found(path),
            });
        }
        inner
            .operations
            .push(FsOperation::DeleteFile(path.to_path_buf()));
        Ok(())
    }

    fn delete_directory(&self, path: &Path) -> Result<(), FsError> {
        let mut inner = self.lock();
        if !inner.dirs.contains(path) {
            return Err(FsError::Delete {
                path: path.to_path_buf(),
                source: not_found(path),
            });
        }
        let occupied = inner.files.keys().any(|p| p.parent() == Some(path))
            || inner.dirs.iter().any(|d| d.parent() == Some(path));
        if occupied {
            return Err(FsError::DirectoryNotEmpty(path.to_path_buf()));
        }
        inner.dirs.remove(path);
        inner
            .operations
            .push(FsOperation::DeleteDirectory(path.to_path_buf()));
        Ok(())
    }

    fn list_children(&self, dir: &Path) -> Result<Vec<String>, FsError> {
        let inner = self.lock();
        if !inner.dirs.contains(dir) {
            return Err(FsError::Read {
                path: dir.to_path_buf(),
                source: not_found(dir),
            });
        }
        let files = inner.files.keys();
        let dirs = inner.dirs.iter();
        let mut names: Vec<String> = files
            .chain(dirs)
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }
}
