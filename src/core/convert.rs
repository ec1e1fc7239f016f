//! core::convert
//!
//! Rewrites expanded `InternalsVisibleTo` declarations into the compact form.
//!
//! # Scanning
//!
//! The scanner works on byte offsets of literal markers. A block runs from
//! an `<ItemGroup>` to the first `</ItemGroup>` after it; nesting is not
//! tracked. A block that contains both the expanded attribute element and a
//! `<_Parameter1>` element is replaced as a whole by a block holding one
//! compact element per parameter value. Every other byte of the text is left
//! exactly as it was.
//!
//! An `<ItemGroup>` with no closing marker ends the scan; the rest of the
//! text is returned untouched.
//!
//! # Example
//!
//! ```
//! use attrshift::core::convert::convert;
//!
//! let text = "<ItemGroup><AssemblyAttribute Include=\"System.Runtime.CompilerServices.InternalsVisibleToAttribute\"><_Parameter1>Bar</_Parameter1></AssemblyAttribute></ItemGroup>";
//! assert_eq!(
//!     convert(text),
//!     "<ItemGroup>    <InternalsVisibleTo Include=\"Bar\" /></ItemGroup>"
//! );
//! ```

use super::markers::{
    ASSEMBLY_ATTRIBUTE_OPEN, BLOCK_INDENT, ITEM_GROUP_CLOSE, ITEM_GROUP_OPEN, PARAMETER_CLOSE,
    PARAMETER_OPEN,
};
use super::types::{compact_element, AttributeDeclaration, LineEnding};

/// Result of a conversion pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// The rewritten text.
    pub text: String,
    /// Number of blocks that were replaced.
    pub converted_blocks: usize,
    /// Every declaration moved to the compact form, in text order.
    pub declarations: Vec<AttributeDeclaration>,
}

impl Conversion {
    /// Whether anything was rewritten.
    pub fn changed(&self) -> bool {
        self.converted_blocks > 0
    }
}

/// Convert every expanded block in `text` to the compact encoding.
pub fn convert(text: &str) -> String {
    convert_with_report(text).text
}

/// Like [`convert`], also reporting which blocks and names were touched.
pub fn convert_with_report(text: &str) -> Conversion {
    let mut out = text.to_string();
    let mut converted_blocks = 0;
    let mut declarations = Vec::new();
    let mut cursor = 0;

    while let Some(found) = out[cursor..].find(ITEM_GROUP_OPEN) {
        let start = cursor + found;
        let Some(close) = out[start..].find(ITEM_GROUP_CLOSE) else {
            break;
        };
        let end = start + close + ITEM_GROUP_CLOSE.len();
        let block = &out[start..end];

        if is_candidate(block) {
            let names = parameter_values(block);
            if !names.is_empty() {
                let replacement = compact_block(block, &names);
                out.replace_range(start..end, &replacement);
                cursor = start + replacement.len();
                converted_blocks += 1;
                declarations.extend(names);
                continue;
            }
        }

        cursor = end;
    }

    Conversion {
        text: out,
        converted_blocks,
        declarations,
    }
}

/// Whether a block holds the expanded encoding.
fn is_candidate(block: &str) -> bool {
    block.contains(ASSEMBLY_ATTRIBUTE_OPEN) && block.contains(PARAMETER_OPEN)
}

/// Every `<_Parameter1>` value in the block, in order.
///
/// Stops at the first parameter without a closing marker. Values that are
/// blank after trimming are skipped.
pub fn parameter_values(block: &str) -> Vec<AttributeDeclaration> {
    let mut names = Vec::new();
    let mut cursor = 0;

    while let Some(found) = block[cursor..].find(PARAMETER_OPEN) {
        let value_start = cursor + found + PARAMETER_OPEN.len();
        let Some(len) = block[value_start..].find(PARAMETER_CLOSE) else {
            break;
        };
        let value_end = value_start + len;
        if let Ok(decl) = AttributeDeclaration::new(&block[value_start..value_end]) {
            names.push(decl);
        }
        cursor = value_end + PARAMETER_CLOSE.len();
    }

    names
}

/// Build the compact replacement for `block`.
///
/// A block written on one line is replaced on one line. A block spanning
/// several lines gets one element per line, with the block's own line
/// terminator.
fn compact_block(block: &str, names: &[AttributeDeclaration]) -> String {
    let mut replacement = String::from(ITEM_GROUP_OPEN);

    if block.contains('\n') {
        let nl = LineEnding::detect(block).as_str();
        for name in names {
            replacement.push_str(nl);
            replacement.push_str(&compact_element(name.project()));
        }
        replacement.push_str(nl);
        replacement.push_str(BLOCK_INDENT);
    } else {
        for name in names {
            replacement.push_str(&compact_element(name.project()));
        }
    }

    replacement.push_str(ITEM_GROUP_CLOSE);
    replacement
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATTR: &str =
        "<AssemblyAttribute Include=\"System.Runtime.CompilerServices.InternalsVisibleToAttribute\">";

    fn expanded_block(names: &[&str], nl: &str) -> String {
        let mut s = format!("  <ItemGroup>{nl}");
        for name in names {
            s.push_str(&format!(
                "    {ATTR}{nl}      <_Parameter1>{name}</_Parameter1>{nl}    </AssemblyAttribute>{nl}"
            ));
        }
        s.push_str("  </ItemGroup>");
        s
    }

    #[test]
    fn single_line_block_is_converted_in_place() {
        let text = format!(
            "<ItemGroup>{ATTR}<_Parameter1>Bar</_Parameter1></AssemblyAttribute></ItemGroup>"
        );
        assert_eq!(
            convert(&text),
            "<ItemGroup>    <InternalsVisibleTo Include=\"Bar\" /></ItemGroup>"
        );
    }

    #[test]
    fn multi_line_block_keeps_layout() {
        let text = format!(
            "<Project Sdk=\"Microsoft.NET.Sdk\">\n\n{}\n\n</Project>\n",
            expanded_block(&["A.Tests", "B.Tests"], "\n")
        );
        let expected = "<Project Sdk=\"Microsoft.NET.Sdk\">\n\n  <ItemGroup>\n    <InternalsVisibleTo Include=\"A.Tests\" />\n    <InternalsVisibleTo Include=\"B.Tests\" />\n  </ItemGroup>\n\n</Project>\n";
        assert_eq!(convert(&text), expected);
    }

    #[test]
    fn crlf_blocks_use_crlf() {
        let text = expanded_block(&["A"], "\r\n");
        assert_eq!(
            convert(&text),
            "  <ItemGroup>\r\n    <InternalsVisibleTo Include=\"A\" />\r\n  </ItemGroup>"
        );
    }

    #[test]
    fn sibling_blocks_are_untouched() {
        let other = "<ItemGroup>\n    <PackageReference Include=\"Serilog\" />\n  </ItemGroup>";
        let text = format!(
            "{other}\n<ItemGroup>{ATTR}<_Parameter1>Bar</_Parameter1></AssemblyAttribute></ItemGroup>\n{other}"
        );
        let report = convert_with_report(&text);
        assert_eq!(
            report.text,
            format!("{other}\n<ItemGroup>    <InternalsVisibleTo Include=\"Bar\" /></ItemGroup>\n{other}")
        );
        assert_eq!(report.converted_blocks, 1);
        assert_eq!(report.declarations, vec![AttributeDeclaration::new("Bar").unwrap()]);
    }

    #[test]
    fn parameter_values_are_trimmed() {
        let text = format!(
            "<ItemGroup>{ATTR}<_Parameter1>  Bar \n</_Parameter1></AssemblyAttribute></ItemGroup>"
        );
        assert!(convert(&text).contains("<InternalsVisibleTo Include=\"Bar\" />"));
    }

    #[test]
    fn compact_blocks_are_left_alone() {
        let text = "<Project Sdk=\"X\">\n  <ItemGroup>\n    <InternalsVisibleTo Include=\"A\" />\n  </ItemGroup>\n</Project>";
        let report = convert_with_report(text);
        assert!(!report.changed());
        assert_eq!(report.text, text);
    }

    #[test]
    fn attribute_without_parameter_is_not_a_candidate() {
        let text = format!("<ItemGroup>{ATTR}</AssemblyAttribute></ItemGroup>");
        assert_eq!(convert(&text), text);
    }

    #[test]
    fn parameter_without_attribute_is_not_a_candidate() {
        let text = "<ItemGroup><_Parameter1>X</_Parameter1></ItemGroup>";
        assert_eq!(convert(text), text);
    }

    #[test]
    fn unclosed_block_stops_scan() {
        let text = format!(
            "<ItemGroup>{ATTR}<_Parameter1>A</_Parameter1></AssemblyAttribute></ItemGroup>\n<ItemGroup>{ATTR}<_Parameter1>B</_Parameter1>"
        );
        let out = convert(&text);
        assert!(out.starts_with("<ItemGroup>    <InternalsVisibleTo Include=\"A\" /></ItemGroup>\n"));
        assert!(out.ends_with(&format!("<ItemGroup>{ATTR}<_Parameter1>B</_Parameter1>")));
    }

    #[test]
    fn unclosed_parameter_leaves_block_untouched() {
        let text = format!("<ItemGroup>{ATTR}<_Parameter1>A</AssemblyAttribute></ItemGroup>");
        assert_eq!(convert(&text), text);
    }

    #[test]
    fn several_candidate_blocks_in_order() {
        let text = format!(
            "{}\n{}",
            expanded_block(&["A"], "\n"),
            expanded_block(&["B", "C"], "\n")
        );
        let report = convert_with_report(&text);
        assert_eq!(report.converted_blocks, 2);
        let names: Vec<_> = report.declarations.iter().map(|d| d.project()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn conversion_is_idempotent() {
        let text = format!(
            "<Project Sdk=\"X\">\n{}\n<ItemGroup>\n  <None Include=\"x\" />\n</ItemGroup>\n</Project>",
            expanded_block(&["A", "B"], "\n")
        );
        let once = convert(&text);
        assert_eq!(convert(&once), once);
    }

    #[test]
    fn parameter_values_stop_at_unclosed() {
        let block = "<_Parameter1>A</_Parameter1><_Parameter1> </_Parameter1><_Parameter1>B";
        let names: Vec<_> = parameter_values(block)
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(names, vec!["A"]);
    }
}
