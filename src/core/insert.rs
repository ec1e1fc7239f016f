//! core::insert
//!
//! Insertion of a new `<ItemGroup>` block into manifest lines.
//!
//! The block goes in front of the first empty line of the manifest. Every
//! original line is copied through untouched; only the new block is added.
//! A manifest without any empty line gets nothing inserted and the caller
//! is expected to report that.

use super::markers::{BLOCK_INDENT, ITEM_GROUP_CLOSE, ITEM_GROUP_OPEN};
use super::types::{AttributeDeclaration, Encoding};

/// Result of an insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
    /// The rewritten manifest lines.
    pub lines: Vec<String>,
    /// Whether the block was actually written.
    pub inserted: bool,
}

/// Insert `declarations` as one block at the first empty line.
///
/// ```
/// use attrshift::core::insert::insert;
/// use attrshift::core::types::{AttributeDeclaration, Encoding};
///
/// let manifest = ["<Project Sdk=\"X\">", "", "</Project>"];
/// let decls = [AttributeDeclaration::new("Foo.Tests").unwrap()];
///
/// assert_eq!(
///     insert(&manifest, &decls, Encoding::Compact),
///     vec![
///         "<Project Sdk=\"X\">",
///         "  <ItemGroup>",
///         "    <InternalsVisibleTo Include=\"Foo.Tests\" />",
///         "  </ItemGroup>",
///         "",
///         "</Project>",
///     ]
/// );
/// ```
pub fn insert<S: AsRef<str>>(
    manifest_lines: &[S],
    declarations: &[AttributeDeclaration],
    encoding: Encoding,
) -> Vec<String> {
    insert_block(manifest_lines, declarations, encoding).lines
}

/// Like [`insert`], also reporting whether an insertion point was found.
pub fn insert_block<S: AsRef<str>>(
    manifest_lines: &[S],
    declarations: &[AttributeDeclaration],
    encoding: Encoding,
) -> Insertion {
    let block_len = declarations.len() * 3 + 2;
    let mut lines = Vec::with_capacity(manifest_lines.len() + block_len);
    let mut pending = !declarations.is_empty();

    for line in manifest_lines {
        let line = line.as_ref();
        if pending && line.is_empty() {
            lines.push(format!("{}{}", BLOCK_INDENT, ITEM_GROUP_OPEN));
            for decl in declarations {
                lines.extend(decl.render(encoding));
            }
            lines.push(format!("{}{}", BLOCK_INDENT, ITEM_GROUP_CLOSE));
            pending = false;
        }
        lines.push(line.to_string());
    }

    Insertion {
        lines,
        inserted: !declarations.is_empty() && !pending,
    }
}
