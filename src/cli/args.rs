//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `[ROOT]`: Directory to search for projects (prompted when missing)
//! - `--mode <MODE>`: What to do (prompted when missing)
//! - `--nowelcome`: Skip the welcome banner
//! - `--dry-run`: Report without writing
//! - `--json`: Print the run summary as JSON
//! - `--config <PATH>`: Use this global config file
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Errors only; implies `--no-interactive`
//! - `--no-interactive`: Never prompt
//! - `--yes` / `-y`: Start without waiting for Enter

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;

use crate::engine::modes::Mode;

/// attrshift - Move InternalsVisibleTo attributes from AssemblyInfo.cs into SDK-style project files
#[derive(Parser, Debug)]
#[command(name = "attrshift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
MODES:
    legacy-encoding-migration   (legacy, 1)   <AssemblyAttribute> blocks
    compact-encoding-migration  (compact, 2)  <InternalsVisibleTo /> elements
    encoding-conversion         (convert, 3)  rewrite blocks as elements

EXAMPLES:
    # Interactive run
    attrshift

    # Scripted run with a summary for tooling
    attrshift ./src --mode compact --yes --json

    # See what would change
    attrshift ./src --mode convert --dry-run")]
pub struct Cli {
    /// Directory searched recursively for project files
    pub root: Option<PathBuf>,

    /// Operating mode: name, alias or menu number
    #[arg(long, value_name = "MODE")]
    pub mode: Option<Mode>,

    /// Skip the welcome banner
    #[arg(long)]
    pub nowelcome: bool,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Global config file to use instead of the default locations
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_interactive: bool,

    /// Start without waiting for Enter
    #[arg(short, long)]
    pub yes: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if neither `--no-interactive` nor `--quiet` was set
    /// and stdin is a terminal.
    pub fn interactive(&self) -> bool {
        if self.no_interactive || self.quiet {
            false
        } else {
            std::io::stdin().is_terminal()
        }
    }
}
