//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive prompts and confirmations
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All terminal output and prompts go through this module so that quiet,
//! JSON and non-interactive runs behave consistently. Diagnostics go
//! through `tracing` instead.

pub mod output;
pub mod prompts;
