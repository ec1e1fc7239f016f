//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Output respects the quiet flag. Status lines carry a local timestamp
//! and are only written when stdout is a terminal, so redirected output
//! stays clean. When `--json` is enabled the summary is the only thing
//! printed on stdout.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use chrono::Local;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print a message (respects quiet mode).
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Format a status line: `[HH:MM:SS] - message`.
pub fn format_status(time: impl Display, message: impl Display) -> String {
    format!("[{}] - {}", time, message)
}

/// Print a timestamped status line.
///
/// Skipped in quiet mode and when stdout is not a terminal.
pub fn status(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Quiet || !io::stdout().is_terminal() {
        return;
    }
    let now = Local::now().format("%H:%M:%S");
    println!("{}", format_status(now, message));
}

/// Welcome banner lines.
pub fn banner_lines() -> Vec<String> {
    let title = format!("attrshift v{}", env!("CARGO_PKG_VERSION"));
    let body = [
        title.as_str(),
        "",
        "Moves InternalsVisibleTo attributes from",
        "AssemblyInfo.cs files into SDK-style",
        "project files.",
    ];
    let width = body.iter().map(|l| l.len()).max().unwrap_or(0) + 4;
    let border = "*".repeat(width + 2);

    let mut lines = vec![border.clone()];
    lines.extend(body.iter().map(|l| format!("*  {:<w$}*", l, w = width - 2)));
    lines.push(border);
    lines.push(String::new());
    lines.push("Follow the instructions to start a migration.".into());
    lines.push(String::new());
    lines
}

/// Print the welcome banner (respects quiet mode).
pub fn banner(verbosity: Verbosity) {
    if verbosity == Verbosity::Quiet {
        return;
    }
    let mut stdout = io::stdout().lock();
    for line in banner_lines() {
        // A closed stdout is not worth failing the run over.
        let _ = writeln!(stdout, "{}", line);
    }
}

/// Format a list of items.
pub fn format_list<T: Display>(items: &[T], prefix: &str) -> String {
    items
        .iter()
        .map(|item| format!("{}{}", prefix, item))
        .collect::<Vec<_>>()
        .join("\n")
}
