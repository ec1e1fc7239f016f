//! engine
//!
//! Runs one mode over every project below a root directory.
//!
//! # Lifecycle
//!
//! ```text
//! Discover manifests -> Load project -> Migrate | Convert -> Report
//! ```
//!
//! Manifests are discovered recursively and processed in sorted path
//! order, one at a time. Ineligible projects are reported as skipped and
//! the run moves on. The first filesystem failure aborts the run; projects
//! already processed keep their changes.
//!
//! # Modes
//!
//! - Legacy and compact migration load a [`ProjectDescriptor`] and hand it
//!   to [`migrate::migrate_project`]
//! - Conversion reads each manifest and hands it to
//!   [`rewrite::rewrite_manifest`]
//!
//! # Example
//!
//! ```no_run
//! use attrshift::engine::{self, Context, modes::Mode};
//! use attrshift::fs::LocalFs;
//! use std::path::PathBuf;
//!
//! let ctx = Context::new(PathBuf::from("/path/to/solution"), Mode::CompactMigration);
//! let summary = engine::run(&ctx, &LocalFs::new(), |_| {}).unwrap();
//! println!("{summary}");
//! ```

pub mod migrate;
pub mod modes;
pub mod report;
pub mod rewrite;

pub use modes::{Mode, ModeError};
pub use report::{ProjectOutcome, ProjectReport, RunSummary};

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::project::{project_name, Loaded, ProjectDescriptor, ProjectLayout};
use crate::core::retention::RetentionPolicy;
use crate::fs::{FileSystem, FsError};

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct Context {
    /// Directory searched for manifests.
    pub root: PathBuf,
    /// What to do with each project.
    pub mode: Mode,
    /// Report without writing.
    pub dry_run: bool,
    /// Names used to locate project files.
    pub layout: ProjectLayout,
    /// What to do with a sidecar after migration.
    pub retention: RetentionPolicy,
    /// Remove the sidecar folder once it is empty.
    pub remove_empty_folder: bool,
}

impl Context {
    /// Context with default layout and retention.
    pub fn new(root: PathBuf, mode: Mode) -> Self {
        Self {
            root,
            mode,
            dry_run: false,
            layout: ProjectLayout::default(),
            retention: RetentionPolicy::default(),
            remove_empty_folder: true,
        }
    }
}

/// Errors from engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("root directory '{0}' does not exist")]
    RootNotFound(PathBuf),

    #[error(transparent)]
    Fs(#[from] FsError),
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, Copy)]
pub enum RunEvent<'a> {
    /// Manifests found below the root.
    Discovered(usize),
    /// Processing of a project is about to start.
    Processing(&'a Path),
    /// A project finished.
    Finished(&'a ProjectReport),
}

/// Process every manifest below `ctx.root`.
///
/// `on_event` sees progress as it happens; the returned summary holds the
/// same reports.
///
/// # Errors
///
/// Fails if the root is missing or any filesystem operation fails.
pub fn run(
    ctx: &Context,
    fs: &dyn FileSystem,
    mut on_event: impl FnMut(RunEvent<'_>),
) -> Result<RunSummary, EngineError> {
    if !fs.directory_exists(&ctx.root) {
        return Err(EngineError::RootNotFound(ctx.root.clone()));
    }

    let manifests = fs.list_files_recursive(&ctx.root, &ctx.layout.manifest_extension)?;
    info!(root = %ctx.root.display(), count = manifests.len(), mode = %ctx.mode, "manifests discovered");
    on_event(RunEvent::Discovered(manifests.len()));

    let mut projects = Vec::with_capacity(manifests.len());
    for manifest_path in &manifests {
        on_event(RunEvent::Processing(manifest_path));
        let report = process(ctx, fs, manifest_path)?;
        on_event(RunEvent::Finished(&report));
        projects.push(report);
    }

    Ok(RunSummary {
        root: ctx.root.clone(),
        mode: ctx.mode,
        dry_run: ctx.dry_run,
        projects,
    })
}

fn process(
    ctx: &Context,
    fs: &dyn FileSystem,
    manifest_path: &Path,
) -> Result<ProjectReport, FsError> {
    let (name, outcome) = match ctx.mode.encoding() {
        Some(encoding) => match ProjectDescriptor::load(fs, manifest_path, &ctx.layout)? {
            Loaded::Ready(project) => {
                let migration = migrate::migrate_project(ctx, fs, &project, encoding)?;
                (project.name().to_string(), ProjectOutcome::Migrated(migration))
            }
            Loaded::Skipped { name, reason } => {
                debug!(project = %name, %reason, "project skipped");
                (name, ProjectOutcome::Skipped { reason })
            }
        },
        None => (
            project_name(manifest_path),
            rewrite::rewrite_manifest(ctx, fs, manifest_path)?,
        ),
    };

    Ok(ProjectReport {
        name,
        manifest_path: manifest_path.to_path_buf(),
        outcome,
    })
}
