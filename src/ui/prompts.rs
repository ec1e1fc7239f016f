//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! inputs that would be prompted for must come from flags or config, or
//! the run fails with [`PromptError::NotInteractive`].
//!
//! Every prompt reads from a [`BufRead`] and writes to a [`Write`], so
//! tests drive them with in-memory buffers. Invalid answers are rejected
//! with a hint and asked again until valid input or end of input.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::modes::Mode;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before an answer was given")]
    Cancelled,

    #[error("not in interactive mode; {0}")]
    NotInteractive(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read one line, without its terminator. `None` at end of input.
fn read_answer(input: &mut impl BufRead) -> Result<Option<String>, PromptError> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Prompt for the root folder.
///
/// Loops until a non-empty path naming an existing directory is entered.
pub fn root_folder(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<PathBuf, PromptError> {
    loop {
        writeln!(output, "Please provide the root folder:")?;
        output.flush()?;
        let answer = read_answer(input)?.ok_or(PromptError::Cancelled)?;
        let answer = answer.trim();
        if answer.is_empty() {
            writeln!(output, "The input was empty. Specify the root folder.")?;
            continue;
        }
        let path = PathBuf::from(answer);
        if !path.is_dir() {
            writeln!(output, "The folder does not exist. Try again.")?;
            continue;
        }
        return Ok(path);
    }
}

/// Prompt for the mode with a numbered menu.
pub fn mode(input: &mut impl BufRead, output: &mut impl Write) -> Result<Mode, PromptError> {
    loop {
        writeln!(output, "Please select what you would like this tool to do:")?;
        for (i, mode) in Mode::ALL.iter().enumerate() {
            writeln!(output, "{}: {}", i + 1, mode.description())?;
        }
        output.flush()?;
        let answer = read_answer(input)?.ok_or(PromptError::Cancelled)?;
        match answer.trim().parse::<usize>().ok().and_then(Mode::from_menu) {
            Some(mode) => return Ok(mode),
            None => writeln!(output, "Invalid input. Use a number from the list.")?,
        }
    }
}

/// Wait for the user to press Enter.
///
/// End of input counts as cancellation.
pub fn wait_for_enter(
    message: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<(), PromptError> {
    write!(output, "{}", message)?;
    output.flush()?;
    read_answer(input)?.ok_or(PromptError::Cancelled)?;
    Ok(())
}
