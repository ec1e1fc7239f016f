//! Property-based tests for the text transformations.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated sidecars and manifests.

use proptest::prelude::*;

use attrshift::core::classify::{classify, partition, Classification};
use attrshift::core::convert::{convert, convert_with_report, parameter_values};
use attrshift::core::insert::insert_block;
use attrshift::core::retention::{decide_retention, Retention};
use attrshift::core::types::{AttributeDeclaration, Encoding};

/// Strategy for project names as they appear in real solutions, with
/// optional surrounding whitespace.
fn project_name() -> impl Strategy<Value = String> {
    ("[ ]{0,2}", "[A-Za-z][A-Za-z0-9_.]{0,30}", "[ ]{0,2}")
        .prop_map(|(lead, name, trail)| format!("{lead}{name}{trail}"))
}

/// Strategy for free text that carries none of the markers.
fn plain_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ;=_.()]{0,40}"
}

fn sidecar_line(name: &str) -> String {
    format!("[assembly: InternalsVisibleTo(\"{name}\")]")
}

/// One segment of a generated manifest.
#[derive(Debug, Clone)]
enum Segment {
    Text(String),
    Expanded(Vec<String>),
    Compact(Vec<String>),
}

fn segment() -> impl Strategy<Value = Segment> {
    prop_oneof![
        plain_text().prop_map(Segment::Text),
        prop::collection::vec(project_name(), 1..4).prop_map(Segment::Expanded),
        prop::collection::vec(project_name(), 1..4).prop_map(Segment::Compact),
    ]
}

fn render_segment(segment: &Segment) -> Vec<String> {
    let block = |names: &[String], encoding: Encoding| {
        let mut lines = vec!["  <ItemGroup>".to_string()];
        for name in names {
            let decl = AttributeDeclaration::new(name).unwrap();
            lines.extend(decl.render(encoding));
        }
        lines.push("  </ItemGroup>".to_string());
        lines
    };
    match segment {
        Segment::Text(text) => vec![text.clone()],
        Segment::Expanded(names) => block(names, Encoding::Expanded),
        Segment::Compact(names) => block(names, Encoding::Compact),
    }
}

fn manifest_text(segments: &[Segment]) -> String {
    let mut text = String::from("<Project Sdk=\"Microsoft.NET.Sdk\">\n");
    for segment in segments {
        for line in render_segment(segment) {
            text.push_str(&line);
            text.push('\n');
        }
    }
    text.push_str("</Project>\n");
    text
}

proptest! {
    /// Every line carrying the migration marker is manifest-bound, whatever surrounds it.
    #[test]
    fn migration_marker_always_wins(prefix in plain_text(), name in project_name(), suffix in plain_text()) {
        let line = format!("{prefix}{}{suffix}", sidecar_line(&name));
        prop_assert_eq!(classify(&line), Classification::ManifestBound);
    }

    /// Title and Guid lines are discarded.
    #[test]
    fn generated_attributes_are_discarded(value in plain_text(), guid in any::<bool>()) {
        let line = if guid {
            format!("[assembly: Guid(\"{value}\")]")
        } else {
            format!("[assembly: AssemblyTitle(\"{value}\")]")
        };
        prop_assert_eq!(classify(&line), Classification::Discarded);
    }

    /// Lines without any marker stay in the sidecar.
    #[test]
    fn plain_lines_stay(line in plain_text()) {
        prop_assert_eq!(classify(&line), Classification::SidecarBound);
    }

    /// A name survives the expanded encoding and conversion, trimmed.
    #[test]
    fn name_round_trips_through_expanded(name in project_name()) {
        let decl = AttributeDeclaration::from_sidecar_line(&sidecar_line(&name)).unwrap();
        let block = format!("<ItemGroup>\n{}\n  </ItemGroup>", decl.render(Encoding::Expanded).join("\n"));

        let names = parameter_values(&block);
        prop_assert_eq!(names.len(), 1);
        prop_assert_eq!(names[0].project(), name.trim());

        let converted = convert(&block);
        let expected = format!("Include=\"{}\" />", name.trim());
        prop_assert!(converted.contains(&expected));
    }

    /// A name survives the compact encoding, trimmed.
    #[test]
    fn name_round_trips_through_compact(name in project_name()) {
        let decl = AttributeDeclaration::from_sidecar_line(&sidecar_line(&name)).unwrap();
        let rendered = decl.render(Encoding::Compact);
        prop_assert_eq!(rendered.len(), 1);

        let line = &rendered[0];
        let start = line.find('"').unwrap() + 1;
        let end = line.rfind('"').unwrap();
        prop_assert_eq!(&line[start..end], name.trim());
    }

    /// Converting twice is the same as converting once.
    #[test]
    fn conversion_is_idempotent(segments in prop::collection::vec(segment(), 0..8)) {
        let once = convert(&manifest_text(&segments));
        let again = convert_with_report(&once);
        prop_assert!(!again.changed());
        prop_assert_eq!(again.text, once);
    }

    /// Conversion touches exactly the expanded blocks and keeps every name.
    #[test]
    fn conversion_keeps_names_in_order(segments in prop::collection::vec(segment(), 0..8)) {
        let report = convert_with_report(&manifest_text(&segments));

        let expanded: Vec<&Segment> = segments.iter().filter(|s| matches!(s, Segment::Expanded(_))).collect();
        prop_assert_eq!(report.converted_blocks, expanded.len());

        let expected: Vec<String> = expanded
            .iter()
            .flat_map(|s| match s {
                Segment::Expanded(names) => names.iter().map(|n| n.trim().to_string()).collect(),
                _ => Vec::new(),
            })
            .collect();
        let actual: Vec<String> = report.declarations.iter().map(|d| d.project().to_string()).collect();
        prop_assert_eq!(actual, expected);
        prop_assert!(!report.text.contains("AssemblyAttribute"));
    }

    /// Removing the inserted block gives back the original manifest.
    #[test]
    fn insertion_preserves_original_lines(
        lines in prop::collection::vec(prop_oneof![plain_text(), Just(String::new())], 0..20),
        names in prop::collection::vec(project_name(), 1..5),
        compact in any::<bool>(),
    ) {
        let encoding = if compact { Encoding::Compact } else { Encoding::Expanded };
        let decls: Vec<_> = names.iter().map(|n| AttributeDeclaration::new(n).unwrap()).collect();
        let result = insert_block(&lines, &decls, encoding);

        let first_empty = lines.iter().position(|l| l.is_empty());
        prop_assert_eq!(result.inserted, first_empty.is_some());

        let mut restored = result.lines.clone();
        if let Some(at) = first_empty {
            let block_len = 2 + decls.len() * if compact { 1 } else { 3 };
            prop_assert_eq!(&restored[at], "  <ItemGroup>");
            restored.drain(at..at + block_len);
        }
        prop_assert_eq!(restored, lines);
    }

    /// Partition sends every declaration to the manifest and nothing else.
    #[test]
    fn partition_accounts_for_every_line(
        others in prop::collection::vec(plain_text(), 0..10),
        names in prop::collection::vec(project_name(), 0..5),
    ) {
        let mut sidecar = others.clone();
        sidecar.extend(names.iter().map(|n| sidecar_line(n)));
        let parts = partition(&sidecar);

        prop_assert_eq!(parts.declarations.len(), names.len());
        prop_assert_eq!(parts.remaining, others.clone());

        let has_content = others.iter().any(|l| !l.is_empty() && !l.starts_with("using "));
        let retention = decide_retention(&others);
        prop_assert_eq!(matches!(retention, Retention::Rewrite(_)), has_content);
    }
}
