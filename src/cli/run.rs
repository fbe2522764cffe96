//! Dispatches to the appropriate command handler based on the parsed arguments.
//!
//! # Returns
//! - `Ok(CommandResult)` with the failures to report
//! - `Err` if the command could not run at all (e.g. invalid config, I/O errors)

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{check::check, init::init, translate::translate},
};
use anyhow::Result;

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
