//! core::markers
//!
//! Literal markers recognized in sidecar and manifest text.
//!
//! Matching is always plain, case-sensitive substring search. Nothing here
//! is a grammar; these are the only tokens the scanners know about.

/// Sidecar line declaring the attribute being migrated.
pub const SIDECAR_INTERNALS_VISIBLE_TO: &str = "[assembly: InternalsVisibleTo(";

/// Sidecar line declaring the assembly title. Never copied anywhere.
pub const SIDECAR_ASSEMBLY_TITLE: &str = "[assembly: AssemblyTitle(";

/// Sidecar line declaring the assembly GUID. Never copied anywhere.
pub const SIDECAR_GUID: &str = "[assembly: Guid(";

/// Prefix of `using` header lines in the sidecar.
pub const SIDECAR_USING_PREFIX: &str = "using ";

/// Prefix the first manifest line must carry for an SDK-style project.
pub const SDK_PROJECT_PREFIX: &str = "<Project Sdk=";

/// Block-open marker.
pub const ITEM_GROUP_OPEN: &str = "<ItemGroup>";

/// Block-close marker.
pub const ITEM_GROUP_CLOSE: &str = "</ItemGroup>";

/// Opening element of the expanded encoding.
pub const ASSEMBLY_ATTRIBUTE_OPEN: &str =
    "<AssemblyAttribute Include=\"System.Runtime.CompilerServices.InternalsVisibleToAttribute\">";

/// Closing element of the expanded encoding.
pub const ASSEMBLY_ATTRIBUTE_CLOSE: &str = "</AssemblyAttribute>";

/// Nested parameter opening marker of the expanded encoding.
pub const PARAMETER_OPEN: &str = "<_Parameter1>";

/// Nested parameter closing marker of the expanded encoding.
pub const PARAMETER_CLOSE: &str = "</_Parameter1>";

/// Indentation of a block marker line written by the inserter.
pub const BLOCK_INDENT: &str = "  ";

/// Indentation of an element nested in a block.
pub const ELEMENT_INDENT: &str = "    ";

/// Indentation of the parameter line of the expanded encoding.
pub const PARAMETER_INDENT: &str = "      ";
