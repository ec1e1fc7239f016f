//! engine::report
//!
//! Per-project outcomes and the run summary.
//!
//! Reports are plain data. The CLI renders them as status lines or, with
//! `--json`, serializes the whole [`RunSummary`].

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use super::modes::Mode;
use crate::core::project::SkipReason;
use crate::core::retention::Retention;
use crate::core::types::AttributeDeclaration;

/// What happened to a sidecar file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SidecarAction {
    Deleted,
    Rewritten,
    Kept,
    /// Declarations could not be inserted, so the sidecar was not touched.
    Untouched,
}

impl From<&Retention> for SidecarAction {
    fn from(retention: &Retention) -> Self {
        match retention {
            Retention::Delete => SidecarAction::Deleted,
            Retention::Rewrite(_) => SidecarAction::Rewritten,
            Retention::Keep => SidecarAction::Kept,
        }
    }
}

/// Result of migrating one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Migration {
    /// Declarations found in the sidecar.
    pub declarations: Vec<AttributeDeclaration>,
    /// Whether the manifest received the declarations.
    pub manifest_updated: bool,
    /// Declarations were found but the manifest has no empty line.
    pub no_insertion_point: bool,
    /// Manifest-bound lines left in the sidecar because no name could be read.
    pub unparsable: Vec<String>,
    /// Number of sidecar lines dropped.
    pub discarded: usize,
    pub sidecar: SidecarAction,
    /// Whether the sidecar folder was removed.
    pub folder_removed: bool,
}

/// Result of converting one manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rewrite {
    /// Number of blocks replaced.
    pub blocks: usize,
    /// Declarations now in the compact form.
    pub declarations: Vec<AttributeDeclaration>,
}

/// Outcome for one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProjectOutcome {
    Skipped { reason: SkipReason },
    Migrated(Migration),
    Converted(Rewrite),
}

/// One processed project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReport {
    pub name: String,
    pub manifest_path: PathBuf,
    #[serde(flatten)]
    pub outcome: ProjectOutcome,
}

impl fmt::Display for ProjectReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ProjectOutcome::Skipped { reason } => {
                write!(f, "{}: skipped, {}", self.name, reason)
            }
            ProjectOutcome::Migrated(m) => {
                if m.declarations.is_empty() {
                    write!(f, "{}: no attributes to add to the project file", self.name)?;
                } else if m.no_insertion_point {
                    write!(
                        f,
                        "{}: {} attribute(s) found but the project file has no empty line to insert them at",
                        self.name,
                        m.declarations.len()
                    )?;
                } else {
                    write!(
                        f,
                        "{}: {} attribute(s) moved to the project file",
                        self.name,
                        m.declarations.len()
                    )?;
                }
                match m.sidecar {
                    SidecarAction::Deleted => write!(f, "; sidecar deleted")?,
                    SidecarAction::Rewritten => write!(f, "; sidecar updated")?,
                    SidecarAction::Kept | SidecarAction::Untouched => {}
                }
                if m.folder_removed {
                    write!(f, "; folder removed")?;
                }
                if !m.unparsable.is_empty() {
                    write!(f, "; {} line(s) left in place", m.unparsable.len())?;
                }
                Ok(())
            }
            ProjectOutcome::Converted(r) if r.blocks == 0 => {
                write!(f, "{}: nothing to convert", self.name)
            }
            ProjectOutcome::Converted(r) => write!(
                f,
                "{}: converted {} attribute(s) in {} block(s)",
                self.name,
                r.declarations.len(),
                r.blocks
            ),
        }
    }
}

/// Everything a run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub root: PathBuf,
    pub mode: Mode,
    pub dry_run: bool,
    pub projects: Vec<ProjectReport>,
}

impl RunSummary {
    /// Projects that were skipped.
    pub fn skipped(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| matches!(p.outcome, ProjectOutcome::Skipped { .. }))
            .count()
    }

    /// Projects whose manifest was (or, in a dry run, would be) written.
    pub fn changed(&self) -> usize {
        self.projects
            .iter()
            .filter(|p| match &p.outcome {
                ProjectOutcome::Migrated(m) => m.manifest_updated,
                ProjectOutcome::Converted(r) => r.blocks > 0,
                ProjectOutcome::Skipped { .. } => false,
            })
            .count()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} project(s) processed, {} changed, {} skipped",
            self.projects.len(),
            self.changed(),
            self.skipped()
        )?;
        if self.dry_run {
            write!(f, " (dry run, nothing written)")?;
        }
        Ok(())
    }
}
