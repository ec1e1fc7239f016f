//! attrshift - Move InternalsVisibleTo attributes into SDK-style project files
//!
//! attrshift walks a directory of .NET projects, takes the
//! `InternalsVisibleTo` attributes out of each `Properties/AssemblyInfo.cs`
//! sidecar and writes them into the project's `.csproj` manifest, in either
//! the expanded `<AssemblyAttribute>` encoding or the compact
//! `<InternalsVisibleTo />` encoding. It can also convert manifests that
//! already carry expanded blocks to the compact encoding.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, prompts, reports)
//! - [`engine`] - Runs a mode over every project below a root
//! - [`core`] - Domain types, pure text transformations, configuration
//! - [`fs`] - Single interface for all filesystem access
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! 1. Lines that are not migrated are reproduced exactly, in order
//! 2. A declaration leaves the sidecar only once it is in the manifest
//! 3. Manifests that are not SDK-style are never written
//! 4. Folders are only removed when they are empty

pub mod cli;
pub mod core;
pub mod engine;
pub mod fs;
pub mod ui;
