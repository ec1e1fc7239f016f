//! engine::migrate
//!
//! Moves sidecar declarations of one project into its manifest.
//!
//! # Steps
//!
//! 1. Partition the sidecar lines
//! 2. Insert the declarations into the manifest and write it
//! 3. Delete, rewrite or keep the sidecar depending on what is left
//! 4. Remove the sidecar folder once it is empty
//!
//! When the manifest offers no insertion point the sidecar is left exactly
//! as it was, so no declaration is lost. Every write is skipped in a dry
//! run; the returned [`Migration`] still describes what would happen.

use tracing::{debug, info, warn};

use super::report::{Migration, SidecarAction};
use super::Context;
use crate::core::classify::partition;
use crate::core::insert::insert_block;
use crate::core::project::ProjectDescriptor;
use crate::core::retention::Retention;
use crate::core::types::Encoding;
use crate::fs::{FileSystem, FsError};

/// Migrate one loaded project.
pub fn migrate_project(
    ctx: &Context,
    fs: &dyn FileSystem,
    project: &ProjectDescriptor,
    encoding: Encoding,
) -> Result<Migration, FsError> {
    let parts = partition(project.sidecar_lines());
    for line in &parts.unparsable {
        warn!(project = project.name(), line = %line, "no quoted project name, leaving line in sidecar");
    }

    let mut migration = Migration {
        declarations: parts.declarations,
        manifest_updated: false,
        no_insertion_point: false,
        unparsable: parts.unparsable,
        discarded: parts.discarded,
        sidecar: SidecarAction::Untouched,
        folder_removed: false,
    };

    if migration.declarations.is_empty() {
        info!(project = project.name(), "no data to add to the project file");
    } else {
        let insertion = insert_block(project.manifest_lines(), &migration.declarations, encoding);
        if !insertion.inserted {
            warn!(
                project = project.name(),
                manifest = %project.manifest_path().display(),
                "project file has no empty line, declarations not inserted"
            );
            migration.no_insertion_point = true;
            return Ok(migration);
        }
        if !ctx.dry_run {
            fs.write_all_lines(
                project.manifest_path(),
                &insertion.lines,
                project.manifest_line_ending(),
            )?;
        }
        info!(
            project = project.name(),
            count = migration.declarations.len(),
            %encoding,
            "project file updated"
        );
        migration.manifest_updated = true;
    }

    let retention = ctx.retention.decide(&parts.remaining);
    migration.sidecar = SidecarAction::from(&retention);
    apply_retention(ctx, fs, project, &retention, &parts.remaining)?;

    if ctx.remove_empty_folder && folder_would_be_empty(ctx, fs, project, &retention)? {
        if !ctx.dry_run {
            fs.delete_directory(project.sidecar_folder_path())?;
        }
        info!(folder = %project.sidecar_folder_path().display(), "folder deleted");
        migration.folder_removed = true;
    }

    Ok(migration)
}

fn apply_retention(
    ctx: &Context,
    fs: &dyn FileSystem,
    project: &ProjectDescriptor,
    retention: &Retention,
    remaining: &[String],
) -> Result<(), FsError> {
    let path = project.sidecar_path();
    match retention {
        Retention::Delete => {
            if !ctx.dry_run {
                fs.delete_file(path)?;
            }
            info!(file = %path.display(), "file deleted");
        }
        Retention::Rewrite(lines) => {
            if !ctx.dry_run {
                fs.write_all_lines(path, lines, project.sidecar_line_ending())?;
            }
            info!(file = %path.display(), "sidecar updated");
        }
        // Kept files still lose the lines that moved to the manifest.
        Retention::Keep if remaining != project.sidecar_lines() => {
            if !ctx.dry_run {
                fs.write_all_lines(path, remaining, project.sidecar_line_ending())?;
            }
            debug!(file = %path.display(), "sidecar kept, migrated lines removed");
        }
        Retention::Keep => debug!(file = %path.display(), "sidecar kept"),
    }
    Ok(())
}

/// Whether the sidecar folder is empty after the retention step.
///
/// In a dry run the sidecar is still on disk, so a pending delete is
/// accounted for by ignoring it.
fn folder_would_be_empty(
    ctx: &Context,
    fs: &dyn FileSystem,
    project: &ProjectDescriptor,
    retention: &Retention,
) -> Result<bool, FsError> {
    let folder = project.sidecar_folder_path();
    if !ctx.dry_run {
        return fs.can_delete(folder);
    }
    let sidecar_name = project
        .sidecar_path()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());
    let pending_delete = matches!(retention, Retention::Delete);
    Ok(fs
        .list_children(folder)?
        .iter()
        .all(|child| pending_delete && Some(child) == sidecar_name.as_ref()))
}
