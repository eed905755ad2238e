//! Command-line interface for deskgenie.
//!
//! This module handles:
//! - argument parsing (clap)
//! - building the session for the target directory
//! - dispatching one-shot commands
//! - the interactive shell, where one session lives across many commands

use crate::activity_log::ActivityLog;
use crate::analytics::report_stats;
use crate::config::FilterConfig;
use crate::duplicates::detect_duplicates;
use crate::empty_folders::delete_empty_folders;
use crate::error::{DeskError, Result};
use crate::launcher::open_in_file_browser;
use crate::organize::{self, folder_counts};
use crate::output::OutputFormatter;
use crate::prompt::{Confirm, ScriptedConfirm, TerminalConfirm};
use crate::session::Session;
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Tidy up your desktop")]
pub struct Args {
    /// Directory to tidy [default: your desktop]
    #[arg(short = 'd', long, value_hint = clap::ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Filter configuration file
    #[arg(short = 'c', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Only print errors
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Write the activity log to this file when done
    #[arg(long, value_name = "PATH")]
    pub export_log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// A user-triggered operation.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sort loose files into Work, Study, Personal and Media folders
    Organize {
        /// Show where files would go without moving anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Move files with duplicate content into the archive folder
    Duplicates,
    /// Delete empty folders
    EmptyFolders,
    /// Show file and folder statistics
    Stats,
    /// Move back every file moved since the last undo
    Undo,
    /// Open the folder that last received files
    OpenLast,
    /// Start an interactive session (default)
    Shell,
}

impl Command {
    /// Returns true if the command can change the filesystem.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Organize { dry_run: false }
                | Command::Duplicates
                | Command::EmptyFolders
                | Command::Undo
        )
    }
}

/// One line typed into the interactive shell.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    #[command(flatten)]
    Run(Command),
    /// Write the activity log to a file
    Export { path: PathBuf },
    /// Clear the screen (the log is kept)
    Clear,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

/// Parses arguments from the environment and runs them.
pub fn run_cli(args: Args) -> Result<()> {
    let root = match args.dir.clone() {
        Some(dir) => dir,
        None => dirs::desktop_dir().ok_or(DeskError::NoDesktop)?,
    };

    let filters = FilterConfig::load(args.config.as_deref())?.compile()?;
    let log = if args.quiet {
        ActivityLog::quiet()
    } else {
        ActivityLog::new()
    };
    let mut session = Session::open(root, filters, log)?;

    let mut confirm: Box<dyn Confirm> = if args.yes {
        Box::new(ScriptedConfirm::always(true))
    } else {
        Box::new(TerminalConfirm)
    };

    let result = match args.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&mut session, confirm.as_mut(), io::stdin().lock()),
        command => run_command(&mut session, &command, confirm.as_mut()),
    };

    if let Some(path) = args.export_log {
        session.log_mut().export(&path)?;
    }

    result
}

/// Runs one command against `session`, saving undo state afterwards.
pub fn run_command(
    session: &mut Session,
    command: &Command,
    confirm: &mut dyn Confirm,
) -> Result<()> {
    match command {
        Command::Organize { dry_run: true } => organize_dry_run(session)?,
        Command::Organize { dry_run: false } => {
            organize::organize(session, confirm)?;
        }
        Command::Duplicates => {
            detect_duplicates(session)?;
        }
        Command::EmptyFolders => {
            delete_empty_folders(session, confirm)?;
        }
        Command::Stats => {
            let stats = report_stats(session)?;
            if !session.log().is_quiet() {
                OutputFormatter::extension_table(&stats);
            }
        }
        Command::Undo => {
            session.undo_all();
        }
        Command::OpenLast => {
            session.open_last_destination(open_in_file_browser);
        }
        Command::Shell => {
            session.log_mut().warning("Already in the shell.");
        }
    }

    if command.is_mutating() {
        session.persist()?;
    }
    Ok(())
}

/// Prints where every file would go, with a per-folder summary.
fn organize_dry_run(session: &mut Session) -> Result<()> {
    let plan = organize::preview(session)?;

    if plan.is_empty() {
        session.log_mut().info("No files to organize.");
        return Ok(());
    }

    if !session.log().is_quiet() {
        OutputFormatter::dry_run_notice("Files would be organized as follows:");
        for planned in &plan {
            OutputFormatter::plain(&format!(
                " - {}\n   → Would move to {}/",
                planned.file_name, planned.category
            ));
        }
        OutputFormatter::summary_table(&folder_counts(&plan), plan.len());
        OutputFormatter::dry_run_notice("No files were modified.");
    }

    Ok(())
}

/// Reads commands from `input` until `quit` or end of input.
///
/// A failing command is logged and the shell keeps going.
pub fn run_shell(
    session: &mut Session,
    confirm: &mut dyn Confirm,
    input: impl BufRead,
) -> Result<()> {
    let banner = format!("Working on {}", session.root().display());
    session.log_mut().info(banner);
    prompt_marker();

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            prompt_marker();
            continue;
        }

        match ShellLine::try_parse_from(words) {
            Ok(parsed) => match parsed.command {
                ShellCommand::Quit => break,
                ShellCommand::Clear => {
                    print!("\x1B[2J\x1B[1;1H");
                    io::stdout().flush()?;
                }
                ShellCommand::Export { path } => {
                    if let Err(e) = session.log_mut().export(&path) {
                        session.log_mut().error(e.to_string());
                    }
                }
                ShellCommand::Run(command) => {
                    if let Err(e) = run_command(session, &command, confirm) {
                        session.log_mut().error(e.to_string());
                    }
                }
            },
            Err(e) => {
                // clap renders help and usage errors itself
                let _ = e.print();
            }
        }
        prompt_marker();
    }

    Ok(())
}

fn prompt_marker() {
    print!("deskgenie> ");
    let _ = io::stdout().flush();
}
