//! core
//!
//! Core domain types and pure text transformations.
//!
//! # Modules
//!
//! - [`markers`] - Literal markers of the sidecar and manifest grammars
//! - [`types`] - Strong types: AttributeDeclaration, Encoding, LineEnding
//! - [`classify`] - Sidecar line classification
//! - [`insert`] - Insertion of a declaration block into manifest lines
//! - [`convert`] - Expanded-to-compact block conversion
//! - [`retention`] - What to do with a sidecar after migration
//! - [`project`] - Project descriptors and loading
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Transformations are pure functions from text to text
//! - Untouched lines and bytes are reproduced exactly
//! - Scanning works on literal markers, never on a parsed tree

pub mod classify;
pub mod config;
pub mod convert;
pub mod insert;
pub mod markers;
pub mod project;
pub mod retention;
pub mod types;
