//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `translate`: Translate one Vox file to Roblox Lua
//! - `check`: Translate files in memory and report every failure
//! - `init`: Initialize vox configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Translate(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    /// Vox source file
    pub input: PathBuf,

    /// Output file (default: INPUT with the configured output extension)
    #[arg(conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the translation to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Files or directories to check (default: current directory)
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a Vox file to Roblox Lua
    Translate(TranslateCommand),
    /// Translate files in memory and report failures without writing output
    Check(CheckCommand),
    /// Initialize a new .voxrc.json configuration file
    Init,
}
