//! core::classify
//!
//! Sidecar line classification.
//!
//! Every line of an `AssemblyInfo.cs` sidecar goes to exactly one place:
//! the manifest, back into the sidecar, or nowhere. The decision looks at
//! one line at a time and carries no state between lines.

use serde::Serialize;

use super::markers::{SIDECAR_ASSEMBLY_TITLE, SIDECAR_GUID, SIDECAR_INTERNALS_VISIBLE_TO};
use super::types::AttributeDeclaration;

/// Where a sidecar line ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The attribute being migrated; moves into the manifest.
    ManifestBound,
    /// Ordinary sidecar content; stays in the sidecar.
    SidecarBound,
    /// Attributes the SDK generates itself; dropped.
    Discarded,
}

/// Classify one sidecar line.
///
/// ```
/// use attrshift::core::classify::{classify, Classification};
///
/// assert_eq!(
///     classify("[assembly: InternalsVisibleTo(\"Foo.Tests\")]"),
///     Classification::ManifestBound
/// );
/// assert_eq!(classify("[assembly: Guid(\"0f3c\")]"), Classification::Discarded);
/// assert_eq!(classify("using System;"), Classification::SidecarBound);
/// ```
pub fn classify(line: &str) -> Classification {
    if line.contains(SIDECAR_INTERNALS_VISIBLE_TO) {
        Classification::ManifestBound
    } else if line.contains(SIDECAR_ASSEMBLY_TITLE) || line.contains(SIDECAR_GUID) {
        Classification::Discarded
    } else {
        Classification::SidecarBound
    }
}

/// A sidecar split into its destinations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Declarations destined for the manifest, in sidecar order.
    pub declarations: Vec<AttributeDeclaration>,
    /// Lines that remain in the sidecar, in sidecar order.
    pub remaining: Vec<String>,
    /// Manifest-bound lines with no usable quoted project name.
    /// These are also kept in `remaining`.
    pub unparsable: Vec<String>,
    /// Number of lines dropped.
    pub discarded: usize,
}

/// Classify every line of a sidecar.
///
/// A manifest-bound line whose project name cannot be extracted stays in
/// the sidecar at its original position.
pub fn partition<S: AsRef<str>>(lines: &[S]) -> Partition {
    let mut out = Partition::default();
    for line in lines {
        let line = line.as_ref();
        match classify(line) {
            Classification::ManifestBound => match AttributeDeclaration::from_sidecar_line(line) {
                Some(decl) => out.declarations.push(decl),
                None => {
                    out.unparsable.push(line.to_string());
                    out.remaining.push(line.to_string());
                }
            },
            Classification::SidecarBound => out.remaining.push(line.to_string()),
            Classification::Discarded => out.discarded += 1,
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internals_visible_to_is_manifest_bound() {
        assert_eq!(
            classify("[assembly: InternalsVisibleTo(\"X\")]"),
            Classification::ManifestBound
        );
        assert_eq!(
            classify("  [assembly: InternalsVisibleTo(\"X, PublicKey=00\")] // note"),
            Classification::ManifestBound
        );
    }

    #[test]
    fn title_and_guid_are_discarded() {
        assert_eq!(
            classify("[assembly: AssemblyTitle(\"My.Lib\")]"),
            Classification::Discarded
        );
        assert_eq!(
            classify("[assembly: Guid(\"d3b0c2a1-0000-0000-0000-000000000000\")]"),
            Classification::Discarded
        );
    }

    #[test]
    fn everything_else_stays() {
        for line in [
            "",
            "using System.Reflection;",
            "[assembly: AssemblyVersion(\"1.0.0.0\")]",
            "[assembly: ComVisible(false)]",
            "// [assembly: internalsvisibleto(\"x\")]",
        ] {
            assert_eq!(classify(line), Classification::SidecarBound, "{line:?}");
        }
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(
            classify("[Assembly: InternalsVisibleTo(\"X\")]"),
            Classification::SidecarBound
        );
    }

    #[test]
    fn migration_marker_wins_over_discard_markers() {
        let line = "[assembly: InternalsVisibleTo(\"X\")] [assembly: Guid(\"1\")]";
        assert_eq!(classify(line), Classification::ManifestBound);
    }

    #[test]
    fn partition_preserves_order() {
        let lines = [
            "using System;",
            "[assembly: AssemblyTitle(\"Lib\")]",
            "[assembly: InternalsVisibleTo(\"A\")]",
            "",
            "[assembly: InternalsVisibleTo(\"B\")]",
            "[assembly: Guid(\"1\")]",
        ];
        let p = partition(&lines);
        let names: Vec<_> = p.declarations.iter().map(|d| d.project()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(p.remaining, vec!["using System;", ""]);
        assert!(p.unparsable.is_empty());
        assert_eq!(p.discarded, 2);
    }

    #[test]
    fn unparsable_declaration_stays_in_place() {
        let lines = [
            "using System;",
            "[assembly: InternalsVisibleTo(TestsName)]",
            "[assembly: ComVisible(false)]",
        ];
        let p = partition(&lines);
        assert!(p.declarations.is_empty());
        assert_eq!(p.unparsable, vec!["[assembly: InternalsVisibleTo(TestsName)]"]);
        assert_eq!(p.remaining, lines);
    }
}
