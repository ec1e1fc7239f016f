//! core::types
//!
//! Strong types for the migration domain.
//!
//! # Types
//!
//! - [`AttributeDeclaration`] - One `InternalsVisibleTo` target, by project name
//! - [`Encoding`] - The two manifest renderings of a declaration
//! - [`LineEnding`] - Line terminator detected in a file
//!
//! # Examples
//!
//! ```
//! use attrshift::core::types::{AttributeDeclaration, Encoding};
//!
//! let decl = AttributeDeclaration::new("  Foo.Tests ").unwrap();
//! assert_eq!(decl.project(), "Foo.Tests");
//! assert_eq!(
//!     decl.render(Encoding::Compact),
//!     vec!["    <InternalsVisibleTo Include=\"Foo.Tests\" />".to_string()]
//! );
//!
//! assert!(AttributeDeclaration::new("   ").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::markers::{
    ASSEMBLY_ATTRIBUTE_CLOSE, ASSEMBLY_ATTRIBUTE_OPEN, ELEMENT_INDENT, PARAMETER_CLOSE,
    PARAMETER_INDENT, PARAMETER_OPEN,
};

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid project name: {0}")]
    InvalidProjectName(String),
}

/// A single `InternalsVisibleTo` declaration.
///
/// The only value carried is the referenced project name, trimmed of
/// surrounding whitespace at construction. Both encodings render that
/// exact string, so extracting it back from either rendering yields the
/// same declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttributeDeclaration(String);

impl AttributeDeclaration {
    /// Create a declaration for `project`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidProjectName` if the trimmed name is empty
    /// or spans several lines.
    pub fn new(project: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = project.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::InvalidProjectName(
                "project name cannot be empty".into(),
            ));
        }
        if trimmed.contains(['\n', '\r']) {
            return Err(TypeError::InvalidProjectName(format!(
                "project name cannot span lines: {:?}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Extract a declaration from a manifest-bound sidecar line.
    ///
    /// The project name is whatever sits between the first and the last
    /// double quote on the line:
    ///
    /// ```
    /// use attrshift::core::types::AttributeDeclaration;
    ///
    /// let decl = AttributeDeclaration::from_sidecar_line(
    ///     "[assembly: InternalsVisibleTo(\"Foo.Tests\")]",
    /// );
    /// assert_eq!(decl.unwrap().project(), "Foo.Tests");
    ///
    /// assert!(AttributeDeclaration::from_sidecar_line("[assembly: InternalsVisibleTo(Foo)]").is_none());
    /// ```
    pub fn from_sidecar_line(line: &str) -> Option<Self> {
        let start = line.find('"')? + 1;
        let end = line.rfind('"')?;
        if end < start {
            return None;
        }
        Self::new(&line[start..end]).ok()
    }

    /// The referenced project name.
    pub fn project(&self) -> &str {
        &self.0
    }

    /// Render the declaration as manifest lines in the given encoding.
    pub fn render(&self, encoding: Encoding) -> Vec<String> {
        match encoding {
            Encoding::Expanded => vec![
                format!("{}{}", ELEMENT_INDENT, ASSEMBLY_ATTRIBUTE_OPEN),
                format!(
                    "{}{}{}{}",
                    PARAMETER_INDENT, PARAMETER_OPEN, self.0, PARAMETER_CLOSE
                ),
                format!("{}{}", ELEMENT_INDENT, ASSEMBLY_ATTRIBUTE_CLOSE),
            ],
            Encoding::Compact => vec![compact_element(&self.0)],
        }
    }
}

/// Render the compact element for `project`, indented for a block body.
pub(crate) fn compact_element(project: &str) -> String {
    format!(
        "{}<InternalsVisibleTo Include=\"{}\" />",
        ELEMENT_INDENT, project
    )
}

impl TryFrom<String> for AttributeDeclaration {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AttributeDeclaration> for String {
    fn from(decl: AttributeDeclaration) -> Self {
        decl.0
    }
}

impl fmt::Display for AttributeDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Manifest rendering of an attribute declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Encoding {
    /// `<AssemblyAttribute>` element with a nested `<_Parameter1>`.
    Expanded,
    /// Self-closing `<InternalsVisibleTo Include="..." />`.
    Compact,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Expanded => write!(f, "expanded"),
            Encoding::Compact => write!(f, "compact"),
        }
    }
}

/// Line terminator used by a text file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// Detect the terminator of `text` from its first line break.
    ///
    /// Text without any line break is treated as LF.
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(idx) if idx > 0 && text.as_bytes()[idx - 1] == b'\r' => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    /// The terminator itself.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}
