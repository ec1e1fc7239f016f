//! cli
//!
//! Command-line interface layer for attrshift.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments
//! - Resolve configuration, then fill gaps by prompting
//! - Report progress and the final summary
//! - Does NOT touch project files directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It builds an [`engine::Context`] from flags and
//! config and hands it to [`engine::run`], which does all filesystem work.
//!
//! Flags override config, config overrides defaults. Inputs still missing
//! after that are prompted for in interactive runs and are an error
//! otherwise.

pub mod args;

pub use args::Cli;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::core::config::Config;
use crate::engine::{self, Context, Mode, ProjectOutcome, RunEvent};
use crate::fs::LocalFs;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::{self, PromptError};

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.debug);

    // JSON owns stdout; everything else is silenced there.
    let verbosity = Verbosity::from_flags(cli.quiet || cli.json, cli.debug);
    let interactive = cli.interactive();
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt_out: Box<dyn Write> = if cli.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    let mut loaded = Config::load(cli.config.as_deref(), cli.root.as_deref())
        .context("failed to load configuration")?;

    if !cli.nowelcome && loaded.config.banner() {
        output::banner(verbosity);
    }
    output::status("Application started.", verbosity);

    let root = match &cli.root {
        Some(root) => root.clone(),
        None => {
            let root = prompt_root(interactive, &mut input, &mut prompt_out)?;
            loaded = Config::load(cli.config.as_deref(), Some(&root))
                .context("failed to load configuration")?;
            root
        }
    };
    for source in &loaded.sources {
        debug!(path = %source.display(), "config loaded");
    }
    let config = loaded.config;

    let mode = match cli.mode.or(config.mode()) {
        Some(mode) => mode,
        None => prompt_mode(interactive, &mut input, &mut prompt_out)?,
    };

    output::status(format!("Root folder is set to: {}", root.display()), verbosity);
    output::status(format!("Mode: {}", mode), verbosity);
    if interactive && !cli.yes {
        prompts::wait_for_enter("All set. Press Enter to begin...", &mut input, &mut prompt_out)?;
    }

    let ctx = Context {
        root,
        mode,
        dry_run: cli.dry_run,
        layout: config.layout(),
        retention: config.retention(),
        remove_empty_folder: config.remove_empty_folder(),
    };

    output::status("Searching for project files.", verbosity);
    let summary = engine::run(&ctx, &LocalFs::new(), |event| report_event(event, verbosity))
        .with_context(|| format!("failed to process '{}'", ctx.root.display()))?;

    if cli.json {
        let json = serde_json::to_string_pretty(&summary).context("failed to serialize summary")?;
        println!("{}", json);
    } else {
        output::print("", verbosity);
        output::print(&summary, verbosity);
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins; otherwise warnings only, or debug with `--debug`.
fn init_tracing(debug: bool) {
    let default = if debug { "attrshift=debug" } else { "attrshift=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // Ignored when a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

fn prompt_root(
    interactive: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<PathBuf> {
    if !interactive {
        return Err(PromptError::NotInteractive("pass the root folder as an argument".into()).into());
    }
    Ok(prompts::root_folder(input, out)?)
}

fn prompt_mode(interactive: bool, input: &mut impl BufRead, out: &mut impl Write) -> Result<Mode> {
    if !interactive {
        return Err(PromptError::NotInteractive(format!(
            "pass --mode ({}) or set `mode` in the config",
            Mode::NAMES.join(", ")
        ))
        .into());
    }
    Ok(prompts::mode(input, out)?)
}

fn report_event(event: RunEvent<'_>, verbosity: Verbosity) {
    match event {
        RunEvent::Discovered(count) => {
            output::status(format!("{} project files found", count), verbosity)
        }
        RunEvent::Processing(path) => {
            output::status(format!("Processing {}", display_name(path)), verbosity)
        }
        RunEvent::Finished(report) => {
            if let ProjectOutcome::Migrated(m) = &report.outcome {
                if m.no_insertion_point {
                    output::warn(
                        format!(
                            "{} has no empty line to insert attributes at; AssemblyInfo left unchanged",
                            report.manifest_path.display()
                        ),
                        verbosity,
                    );
                }
                if !m.unparsable.is_empty() {
                    output::warn(
                        format!(
                            "{}: attribute lines without a quoted name were left in place:\n{}",
                            report.name,
                            output::format_list(&m.unparsable, "  ")
                        ),
                        verbosity,
                    );
                }
            }
            output::status(report, verbosity);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
