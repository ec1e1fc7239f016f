//! engine::rewrite
//!
//! Converts the expanded blocks of one manifest to the compact encoding.

use std::path::Path;

use tracing::{debug, info};

use super::report::{ProjectOutcome, Rewrite};
use super::Context;
use crate::core::convert::convert_with_report;
use crate::core::markers::SDK_PROJECT_PREFIX;
use crate::core::project::SkipReason;
use crate::fs::{FileSystem, FsError};

/// Convert one manifest in place.
///
/// The file is only written when the conversion changed something.
pub fn rewrite_manifest(
    ctx: &Context,
    fs: &dyn FileSystem,
    manifest_path: &Path,
) -> Result<ProjectOutcome, FsError> {
    let text = fs.read_to_string(manifest_path)?;
    let first_line = text.lines().next().unwrap_or_default();
    if !first_line.starts_with(SDK_PROJECT_PREFIX) {
        return Ok(ProjectOutcome::Skipped {
            reason: SkipReason::NonSdkManifest,
        });
    }

    let conversion = convert_with_report(&text);
    if conversion.changed() {
        if !ctx.dry_run {
            fs.write_string(manifest_path, &conversion.text)?;
        }
        info!(
            manifest = %manifest_path.display(),
            blocks = conversion.converted_blocks,
            "project file converted"
        );
    } else {
        debug!(manifest = %manifest_path.display(), "nothing to convert");
    }

    Ok(ProjectOutcome::Converted(Rewrite {
        blocks: conversion.converted_blocks,
        declarations: conversion.declarations,
    }))
}
