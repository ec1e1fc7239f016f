//! fs
//!
//! Single interface for all filesystem access.
//!
//! # Architecture
//!
//! The transformation code in [`crate::core`] never touches the disk. The
//! engine reads and writes through the [`FileSystem`] trait so that the
//! same flow runs against the real disk ([`LocalFs`]) or an in-memory tree
//! ([`MemoryFs`]) in tests.
//!
//! # Text handling
//!
//! - A leading UTF-8 byte order mark is dropped on read
//! - Files are written without a byte order mark
//! - `write_all_lines` terminates every line, including the last
//!
//! # Errors
//!
//! Every failure is an [`FsError`] carrying the path involved. Nothing in
//! this module retries.

pub mod local;
pub mod mock;

pub use local::LocalFs;
pub use mock::MemoryFs;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::types::LineEnding;

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to delete '{path}': {source}")]
    Delete {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to walk '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    #[error("'{0}' is not valid UTF-8")]
    InvalidUtf8(PathBuf),

    #[error("directory '{0}' is not empty")]
    DirectoryNotEmpty(PathBuf),

    #[error("'{0}' not found")]
    NotFound(PathBuf),
}

/// Filesystem operations used by the engine.
pub trait FileSystem {
    /// Every file under `root` whose extension equals `extension`
    /// (without the dot, compared case-insensitively), sorted by path.
    fn list_files_recursive(&self, root: &Path, extension: &str) -> Result<Vec<PathBuf>, FsError>;

    /// Whole file as text.
    fn read_to_string(&self, path: &Path) -> Result<String, FsError>;

    /// Overwrite `path` with `text`.
    fn write_string(&self, path: &Path, text: &str) -> Result<(), FsError>;

    fn directory_exists(&self, path: &Path) -> bool;

    fn file_exists(&self, path: &Path) -> bool;

    fn delete_file(&self, path: &Path) -> Result<(), FsError>;

    /// Remove an empty directory. Fails if anything is left inside.
    fn delete_directory(&self, path: &Path) -> Result<(), FsError>;

    /// Names of the direct children of `dir`, files and directories alike.
    fn list_children(&self, dir: &Path) -> Result<Vec<String>, FsError>;

    /// Whole file split into lines, with the terminator it uses.
    fn read_all_lines(&self, path: &Path) -> Result<(Vec<String>, LineEnding), FsError> {
        let text = self.read_to_string(path)?;
        Ok(split_lines(&text))
    }

    /// Overwrite `path` with `lines`, each followed by `ending`.
    fn write_all_lines(
        &self,
        path: &Path,
        lines: &[String],
        ending: LineEnding,
    ) -> Result<(), FsError> {
        self.write_string(path, &join_lines(lines, ending))
    }

    /// Whether `folder` can be removed without a recursive delete.
    fn can_delete(&self, folder: &Path) -> Result<bool, FsError> {
        Ok(self.list_children(folder)?.is_empty())
    }

    /// Direct child of `dir` whose name matches `name` ignoring ASCII case.
    /// An exact match is preferred.
    fn find_child(&self, dir: &Path, name: &str) -> Result<Option<PathBuf>, FsError> {
        if !self.directory_exists(dir) {
            return Ok(None);
        }
        let children = self.list_children(dir)?;
        let found = children
            .iter()
            .find(|c| c.as_str() == name)
            .or_else(|| children.iter().find(|c| c.eq_ignore_ascii_case(name)));
        Ok(found.map(|c| dir.join(c)))
    }
}

/// Split text into lines, recognizing `\n` and `\r\n`.
///
/// A trailing terminator does not produce an extra empty line.
///
/// ```
/// use attrshift::core::types::LineEnding;
/// use attrshift::fs::split_lines;
///
/// let (lines, ending) = split_lines("a\r\n\r\nb\r\n");
/// assert_eq!(lines, vec!["a", "", "b"]);
/// assert_eq!(ending, LineEnding::CrLf);
/// ```
pub fn split_lines(text: &str) -> (Vec<String>, LineEnding) {
    let ending = LineEnding::detect(text);
    let lines = text.lines().map(str::to_string).collect();
    (lines, ending)
}

/// Join lines, terminating each with `ending`.
pub fn join_lines(lines: &[String], ending: LineEnding) -> String {
    let nl = ending.as_str();
    let mut out = String::with_capacity(lines.iter().map(|l| l.len() + nl.len()).sum());
    for line in lines {
        out.push_str(line);
        out.push_str(nl);
    }
    out
}

/// Drop a leading UTF-8 byte order mark.
pub(crate) fn strip_bom(text: String) -> String {
    match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// Whether `path` has `extension`, ignoring ASCII case.
pub(crate) fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_and_join_lf() {
        let (lines, ending) = split_lines("a\n\nb\n");
        assert_eq!(lines, vec!["a", "", "b"]);
        assert_eq!(ending, LineEnding::Lf);
        assert_eq!(join_lines(&lines, ending), "a\n\nb\n");
    }

    #[test]
    fn split_without_trailing_newline() {
        let (lines, _) = split_lines("a\nb");
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn join_crlf() {
        let lines = vec!["x".to_string(), String::new()];
        assert_eq!(join_lines(&lines, LineEnding::CrLf), "x\r\n\r\n");
    }

    #[test]
    fn bom_is_stripped() {
        assert_eq!(strip_bom("\u{feff}<Project".into()), "<Project");
        assert_eq!(strip_bom("<Project".into()), "<Project");
    }

    #[test]
    fn extension_matching() {
        assert!(has_extension(Path::new("a/B.csproj"), "csproj"));
        assert!(has_extension(Path::new("a/B.CSPROJ"), ".csproj"));
        assert!(!has_extension(Path::new("a/B.csproj.user"), "csproj"));
        assert!(!has_extension(Path::new("a/csproj"), "csproj"));
    }
}
