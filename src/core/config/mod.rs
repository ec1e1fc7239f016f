//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! attrshift has two configuration scopes:
//! - **Global**: User-level settings
//! - **Root**: Overrides stored in the directory being migrated
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Root config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. An explicit path (`--config`)
//! 2. `$ATTRSHIFT_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/attrshift/config.toml`
//! 4. `~/.attrshift/config.toml`
//!
//! # Root Config Location
//!
//! `<root>/.attrshift.toml`
//!
//! # Example
//!
//! ```no_run
//! use attrshift::core::config::Config;
//! use std::path::Path;
//!
//! let result = Config::load(None, Some(Path::new("/path/to/solution"))).unwrap();
//! let config = result.config;
//!
//! println!("Sidecar: {}", config.layout().sidecar_file);
//! println!("Banner: {}", config.banner());
//! ```

pub mod schema;

pub use schema::{FileConfig, LayoutConfig, SidecarConfig};

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::project::ProjectLayout;
use crate::core::retention::RetentionPolicy;
use crate::engine::modes::Mode;

/// File name of the root config.
pub const ROOT_CONFIG_FILE: &str = ".attrshift.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("config file '{0}' does not exist")]
    Missing(PathBuf),
}

/// Result of loading configuration.
#[derive(Debug)]
pub struct ConfigLoadResult {
    /// The loaded configuration.
    pub config: Config,
    /// Files that contributed, lowest precedence first.
    pub sources: Vec<PathBuf>,
}

/// Merged configuration from all sources.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    file: FileConfig,
}

impl Config {
    /// Build a config from an already merged file.
    pub fn from_file(file: FileConfig) -> Self {
        Self { file }
    }

    /// Load configuration from default locations.
    ///
    /// `explicit` replaces the global search when given. `root` adds the
    /// root config of the directory being processed.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated, or if `explicit` does not exist. Missing default files
    /// are not an error.
    pub fn load(explicit: Option<&Path>, root: Option<&Path>) -> Result<ConfigLoadResult, ConfigError> {
        let global_path = match explicit {
            Some(path) if !path.is_file() => return Err(ConfigError::Missing(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_global(),
        };
        let root_path = root
            .map(|r| r.join(ROOT_CONFIG_FILE))
            .filter(|p| p.is_file());

        Self::load_files(global_path.as_deref(), root_path.as_deref())
    }

    /// Merge the given files, global first.
    pub fn load_files(
        global: Option<&Path>,
        root: Option<&Path>,
    ) -> Result<ConfigLoadResult, ConfigError> {
        let mut merged = FileConfig::default();
        let mut sources = Vec::new();

        for path in [global, root].into_iter().flatten() {
            let file = Self::read_config(path)?;
            file.validate()?;
            merged = merged.merged_with(&file);
            sources.push(path.to_path_buf());
        }

        Ok(ConfigLoadResult {
            config: Config { file: merged },
            sources,
        })
    }

    /// First existing global config file.
    fn find_global() -> Option<PathBuf> {
        // 1. Check $ATTRSHIFT_CONFIG
        if let Ok(path) = std::env::var("ATTRSHIFT_CONFIG") {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Some(path);
            }
        }

        // 2. Check $XDG_CONFIG_HOME/attrshift/config.toml
        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("attrshift/config.toml");
            if path.is_file() {
                return Some(path);
            }
        }

        // 3. Check ~/.attrshift/config.toml
        dirs::home_dir()
            .map(|home| home.join(".attrshift/config.toml"))
            .filter(|path| path.is_file())
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Configured default mode, if any.
    pub fn mode(&self) -> Option<Mode> {
        self.file.mode
    }

    /// Whether to show the welcome banner.
    ///
    /// Defaults to `true` if not configured.
    pub fn banner(&self) -> bool {
        self.file.banner.unwrap_or(true)
    }

    /// Project layout with defaults applied.
    pub fn layout(&self) -> ProjectLayout {
        let mut layout = ProjectLayout::default();
        if let Some(cfg) = &self.file.layout {
            if let Some(ext) = &cfg.manifest_extension {
                layout.manifest_extension = ext.trim_start_matches('.').to_string();
            }
            if let Some(folder) = &cfg.sidecar_folder {
                layout.sidecar_folder = folder.clone();
            }
            if let Some(file) = &cfg.sidecar_file {
                layout.sidecar_file = file.clone();
            }
        }
        layout
    }

    /// Sidecar retention policy.
    ///
    /// Deletion of emptied sidecars defaults to `true`.
    pub fn retention(&self) -> RetentionPolicy {
        RetentionPolicy {
            delete_when_empty: self
                .file
                .sidecar
                .as_ref()
                .and_then(|s| s.delete_when_empty)
                .unwrap_or(true),
        }
    }

    /// Whether an emptied sidecar folder is removed.
    ///
    /// Defaults to `true` if not configured.
    pub fn remove_empty_folder(&self) -> bool {
        self.file
            .sidecar
            .as_ref()
            .and_then(|s| s.remove_empty_folder)
            .unwrap_or(true)
    }
}
