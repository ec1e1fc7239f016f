//! engine::modes
//!
//! The three things a run can do.
//!
//! Two modes migrate sidecar attributes into manifests and differ only in
//! the encoding they write. The third rewrites manifests in place and never
//! looks at sidecars.
//!
//! # Example
//!
//! ```
//! use attrshift::core::types::Encoding;
//! use attrshift::engine::modes::Mode;
//!
//! let mode: Mode = "compact".parse().unwrap();
//! assert_eq!(mode, Mode::CompactMigration);
//! assert_eq!(mode.encoding(), Some(Encoding::Compact));
//! assert_eq!(Mode::from_menu(3), Some(Mode::Conversion));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::types::Encoding;

/// Errors from mode resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    #[error("unknown mode '{0}', expected one of: {names}", names = Mode::NAMES.join(", "))]
    Unknown(String),
}

/// Operating mode of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Move sidecar attributes into `<AssemblyAttribute>` blocks.
    #[serde(rename = "legacy-encoding-migration", alias = "legacy")]
    LegacyMigration,
    /// Move sidecar attributes into `<InternalsVisibleTo />` elements.
    #[serde(rename = "compact-encoding-migration", alias = "compact")]
    CompactMigration,
    /// Rewrite `<AssemblyAttribute>` blocks as `<InternalsVisibleTo />`.
    #[serde(rename = "encoding-conversion", alias = "convert")]
    Conversion,
}

impl Mode {
    /// Canonical names, in menu order.
    pub const NAMES: [&'static str; 3] = [
        "legacy-encoding-migration",
        "compact-encoding-migration",
        "encoding-conversion",
    ];

    /// All modes, in menu order.
    pub const ALL: [Mode; 3] = [
        Mode::LegacyMigration,
        Mode::CompactMigration,
        Mode::Conversion,
    ];

    /// Canonical name.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::LegacyMigration => Self::NAMES[0],
            Mode::CompactMigration => Self::NAMES[1],
            Mode::Conversion => Self::NAMES[2],
        }
    }

    /// One-line description shown in the interactive menu.
    pub fn description(&self) -> &'static str {
        match self {
            Mode::LegacyMigration => "Transfer attributes in old (.NET Framework) style.",
            Mode::CompactMigration => "Transfer attributes in new (.NET 5 +) style.",
            Mode::Conversion => {
                "Replace attributes in projects from the old style to the new style."
            }
        }
    }

    /// Mode for a 1-based menu entry.
    pub fn from_menu(index: usize) -> Option<Mode> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// Encoding written by a migration mode; `None` for conversion.
    pub fn encoding(&self) -> Option<Encoding> {
        match self {
            Mode::LegacyMigration => Some(Encoding::Expanded),
            Mode::CompactMigration => Some(Encoding::Compact),
            Mode::Conversion => None,
        }
    }

    /// Whether this mode touches sidecars.
    pub fn is_migration(&self) -> bool {
        self.encoding().is_some()
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    /// Accepts canonical names, short aliases and menu numbers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Mode::from_menu(index).ok_or_else(|| ModeError::Unknown(s.to_string()));
        }
        match s {
            "legacy-encoding-migration" | "legacy" => Ok(Mode::LegacyMigration),
            "compact-encoding-migration" | "compact" => Ok(Mode::CompactMigration),
            "encoding-conversion" | "convert" => Ok(Mode::Conversion),
            _ => Err(ModeError::Unknown(s.to_string())),
        }
    }
}
