//! core::project
//!
//! Project descriptors: one manifest plus its sidecar, loaded once.
//!
//! # Layout
//!
//! A project is a manifest file (`App.csproj`) whose directory holds a
//! sidecar folder (`Properties/`) containing the sidecar file
//! (`AssemblyInfo.cs`). The folder and file names come from
//! [`ProjectLayout`] and are matched ignoring ASCII case, with an exact
//! match preferred.
//!
//! # Eligibility
//!
//! Only SDK-style manifests (first line starting with `<Project Sdk=`) are
//! touched. Ineligible projects are reported as skipped, never as errors.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use super::markers::SDK_PROJECT_PREFIX;
use super::types::LineEnding;
use crate::fs::{FileSystem, FsError};

/// Names used to locate the files of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Manifest extension, without the dot.
    pub manifest_extension: String,
    /// Sidecar folder next to the manifest.
    pub sidecar_folder: String,
    /// Sidecar file inside the sidecar folder.
    pub sidecar_file: String,
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            manifest_extension: "csproj".into(),
            sidecar_folder: "Properties".into(),
            sidecar_file: "AssemblyInfo.cs".into(),
        }
    }
}

/// Why a project was not processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The manifest is not an SDK-style project.
    NonSdkManifest,
    /// No sidecar folder or file next to the manifest.
    MissingSidecar,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonSdkManifest => write!(f, "not an SDK-style project"),
            SkipReason::MissingSidecar => write!(f, "no AssemblyInfo sidecar found"),
        }
    }
}

/// Whether the first manifest line marks an SDK-style project.
pub fn is_sdk_manifest<S: AsRef<str>>(manifest_lines: &[S]) -> bool {
    manifest_lines
        .first()
        .is_some_and(|first| first.as_ref().starts_with(SDK_PROJECT_PREFIX))
}

/// Project name: the manifest file name without its extension.
pub fn project_name(manifest_path: &Path) -> String {
    manifest_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Immutable snapshot of a project taken at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    name: String,
    manifest_path: PathBuf,
    manifest_lines: Vec<String>,
    manifest_line_ending: LineEnding,
    sidecar_path: PathBuf,
    sidecar_lines: Vec<String>,
    sidecar_line_ending: LineEnding,
    sidecar_folder_path: PathBuf,
}

/// Outcome of loading a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    Ready(ProjectDescriptor),
    Skipped { name: String, reason: SkipReason },
}

impl ProjectDescriptor {
    /// Load the project owning `manifest_path`.
    ///
    /// # Errors
    ///
    /// Only filesystem failures are errors. A missing sidecar or a
    /// non-SDK manifest yields [`Loaded::Skipped`].
    pub fn load(
        fs: &dyn FileSystem,
        manifest_path: &Path,
        layout: &ProjectLayout,
    ) -> Result<Loaded, FsError> {
        let name = project_name(manifest_path);
        let project_dir = manifest_path.parent().unwrap_or(Path::new(""));

        let Some((sidecar_folder_path, sidecar_path)) = locate_sidecar(fs, project_dir, layout)?
        else {
            debug!(project = %name, "sidecar not found");
            return Ok(Loaded::Skipped {
                name,
                reason: SkipReason::MissingSidecar,
            });
        };

        let (manifest_lines, manifest_line_ending) = fs.read_all_lines(manifest_path)?;
        if !is_sdk_manifest(&manifest_lines) {
            return Ok(Loaded::Skipped {
                name,
                reason: SkipReason::NonSdkManifest,
            });
        }

        let (sidecar_lines, sidecar_line_ending) = fs.read_all_lines(&sidecar_path)?;
        debug!(
            project = %name,
            manifest_lines = manifest_lines.len(),
            sidecar_lines = sidecar_lines.len(),
            "loaded project"
        );

        Ok(Loaded::Ready(ProjectDescriptor {
            name,
            manifest_path: manifest_path.to_path_buf(),
            manifest_lines,
            manifest_line_ending,
            sidecar_path,
            sidecar_lines,
            sidecar_line_ending,
            sidecar_folder_path,
        }))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn manifest_lines(&self) -> &[String] {
        &self.manifest_lines
    }

    pub fn manifest_line_ending(&self) -> LineEnding {
        self.manifest_line_ending
    }

    pub fn sidecar_path(&self) -> &Path {
        &self.sidecar_path
    }

    pub fn sidecar_lines(&self) -> &[String] {
        &self.sidecar_lines
    }

    pub fn sidecar_line_ending(&self) -> LineEnding {
        self.sidecar_line_ending
    }

    pub fn sidecar_folder_path(&self) -> &Path {
        &self.sidecar_folder_path
    }
}

/// Find the sidecar folder and file for a project directory.
fn locate_sidecar(
    fs: &dyn FileSystem,
    project_dir: &Path,
    layout: &ProjectLayout,
) -> Result<Option<(PathBuf, PathBuf)>, FsError> {
    let Some(folder) = fs.find_child(project_dir, &layout.sidecar_folder)? else {
        return Ok(None);
    };
    if !fs.directory_exists(&folder) {
        return Ok(None);
    }
    let Some(file) = fs.find_child(&folder, &layout.sidecar_file)? else {
        return Ok(None);
    };
    if !fs.file_exists(&file) {
        return Ok(None);
    }
    Ok(Some((folder, file)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFs;

    const SDK_MANIFEST: &str = "<Project Sdk=\"Microsoft.NET.Sdk\">\n\n</Project>\n";

    fn load(fs: &MemoryFs, path: &str) -> Loaded {
        ProjectDescriptor::load(fs, Path::new(path), &ProjectLayout::default()).unwrap()
    }

    #[test]
    fn loads_sdk_project_with_sidecar() {
        let fs = MemoryFs::new();
        fs.add_file("/src/App/App.csproj", SDK_MANIFEST);
        fs.add_file(
            "/src/App/Properties/AssemblyInfo.cs",
            "using System;\r\n[assembly: InternalsVisibleTo(\"App.Tests\")]\r\n",
        );

        let Loaded::Ready(project) = load(&fs, "/src/App/App.csproj") else {
            panic!("expected project to load");
        };
        assert_eq!(project.name(), "App");
        assert_eq!(project.manifest_lines().len(), 3);
        assert_eq!(project.manifest_line_ending(), LineEnding::Lf);
        assert_eq!(project.sidecar_line_ending(), LineEnding::CrLf);
        assert_eq!(
            project.sidecar_path(),
            Path::new("/src/App/Properties/AssemblyInfo.cs")
        );
        assert_eq!(project.sidecar_folder_path(), Path::new("/src/App/Properties"));
        assert_eq!(project.sidecar_lines()[0], "using System;");
    }

    #[test]
    fn sidecar_folder_case_is_ignored() {
        let fs = MemoryFs::new();
        fs.add_file("/p/Lib.csproj", SDK_MANIFEST);
        fs.add_file("/p/properties/assemblyinfo.cs", "using System;\n");
        assert!(matches!(load(&fs, "/p/Lib.csproj"), Loaded::Ready(_)));
    }

    #[test]
    fn missing_sidecar_is_skipped() {
        let fs = MemoryFs::new();
        fs.add_file("/p/Lib.csproj", SDK_MANIFEST);
        assert_eq!(
            load(&fs, "/p/Lib.csproj"),
            Loaded::Skipped {
                name: "Lib".into(),
                reason: SkipReason::MissingSidecar
            }
        );

        fs.add_dir("/p/Properties");
        assert!(matches!(
            load(&fs, "/p/Lib.csproj"),
            Loaded::Skipped {
                reason: SkipReason::MissingSidecar,
                ..
            }
        ));
    }

    #[test]
    fn sidecar_name_that_is_a_directory_is_missing() {
        let fs = MemoryFs::new();
        fs.add_file("/p/Lib.csproj", SDK_MANIFEST);
        fs.add_dir("/p/Properties/AssemblyInfo.cs");
        assert!(matches!(
            load(&fs, "/p/Lib.csproj"),
            Loaded::Skipped {
                reason: SkipReason::MissingSidecar,
                ..
            }
        ));
    }

    #[test]
    fn legacy_manifest_is_skipped() {
        let fs = MemoryFs::new();
        fs.add_file(
            "/p/Old.csproj",
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<Project ToolsVersion=\"15.0\">\n",
        );
        fs.add_file("/p/Properties/AssemblyInfo.cs", "");
        assert_eq!(
            load(&fs, "/p/Old.csproj"),
            Loaded::Skipped {
                name: "Old".into(),
                reason: SkipReason::NonSdkManifest
            }
        );
    }

    #[test]
    fn bom_does_not_hide_sdk_prefix() {
        let fs = MemoryFs::new();
        fs.add_file("/p/Lib.csproj", &format!("\u{feff}{SDK_MANIFEST}"));
        fs.add_file("/p/Properties/AssemblyInfo.cs", "");
        assert!(matches!(load(&fs, "/p/Lib.csproj"), Loaded::Ready(_)));
    }

    #[test]
    fn sdk_detection() {
        assert!(is_sdk_manifest(&["<Project Sdk=\"Microsoft.NET.Sdk.Web\">"]));
        assert!(!is_sdk_manifest(&[" <Project Sdk=\"X\">"]));
        assert!(!is_sdk_manifest::<&str>(&[]));
    }
}
