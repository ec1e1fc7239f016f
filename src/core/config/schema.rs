//! core::config::schema
//!
//! Configuration schema types.
//!
//! The same schema is used for the global file and for the per-root
//! `.attrshift.toml`. Every field is optional so that a root file can
//! override a single value.
//!
//! # Validation
//!
//! File and folder names must be plain names: non-empty and free of path
//! separators.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::engine::modes::Mode;

/// Contents of one configuration file.
///
/// # Example
///
/// ```toml
/// mode = "compact-encoding-migration"
/// banner = false
///
/// [layout]
/// manifest_extension = "csproj"
/// sidecar_folder = "Properties"
/// sidecar_file = "AssemblyInfo.cs"
///
/// [sidecar]
/// delete_when_empty = true
/// remove_empty_folder = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Mode used when none is given on the command line.
    pub mode: Option<Mode>,

    /// Show the welcome banner.
    pub banner: Option<bool>,

    /// Where projects keep their files.
    pub layout: Option<LayoutConfig>,

    /// What to do with emptied sidecars.
    pub sidecar: Option<SidecarConfig>,
}

impl FileConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(layout) = &self.layout {
            layout.validate()?;
        }
        Ok(())
    }

    /// Overlay `other` on top of `self`, field by field.
    pub fn merged_with(&self, other: &FileConfig) -> FileConfig {
        FileConfig {
            mode: other.mode.or(self.mode),
            banner: other.banner.or(self.banner),
            layout: merge_nested(&self.layout, &other.layout, LayoutConfig::merged_with),
            sidecar: merge_nested(&self.sidecar, &other.sidecar, SidecarConfig::merged_with),
        }
    }
}

fn merge_nested<T: Clone>(base: &Option<T>, over: &Option<T>, merge: fn(&T, &T) -> T) -> Option<T> {
    match (base, over) {
        (Some(b), Some(o)) => Some(merge(b, o)),
        (None, o) => o.clone(),
        (b, None) => b.clone(),
    }
}

/// Project layout names.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Manifest extension (default: "csproj")
    pub manifest_extension: Option<String>,

    /// Sidecar folder name (default: "Properties")
    pub sidecar_folder: Option<String>,

    /// Sidecar file name (default: "AssemblyInfo.cs")
    pub sidecar_file: Option<String>,
}

impl LayoutConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ext) = &self.manifest_extension {
            validate_name("layout.manifest_extension", ext.trim_start_matches('.'))?;
        }
        if let Some(folder) = &self.sidecar_folder {
            validate_name("layout.sidecar_folder", folder)?;
        }
        if let Some(file) = &self.sidecar_file {
            validate_name("layout.sidecar_file", file)?;
        }
        Ok(())
    }

    fn merged_with(&self, other: &LayoutConfig) -> LayoutConfig {
        LayoutConfig {
            manifest_extension: other
                .manifest_extension
                .clone()
                .or_else(|| self.manifest_extension.clone()),
            sidecar_folder: other
                .sidecar_folder
                .clone()
                .or_else(|| self.sidecar_folder.clone()),
            sidecar_file: other
                .sidecar_file
                .clone()
                .or_else(|| self.sidecar_file.clone()),
        }
    }
}

/// Sidecar clean-up settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SidecarConfig {
    /// Delete sidecars left with only `using` and blank lines (default: true)
    pub delete_when_empty: Option<bool>,

    /// Remove the sidecar folder once it is empty (default: true)
    pub remove_empty_folder: Option<bool>,
}

impl SidecarConfig {
    fn merged_with(&self, other: &SidecarConfig) -> SidecarConfig {
        SidecarConfig {
            delete_when_empty: other.delete_when_empty.or(self.delete_when_empty),
            remove_empty_folder: other.remove_empty_folder.or(self.remove_empty_folder),
        }
    }
}

fn validate_name(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue(format!("{} cannot be empty", key)));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::InvalidValue(format!(
            "{} must be a plain name, got '{}'",
            key, value
        )));
    }
    Ok(())
}
