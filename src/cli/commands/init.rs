use std::{fs, path::PathBuf};

use anyhow::Result;

use super::{CommandResult, CommandSummary, Failure, InitSummary};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init() -> Result<CommandResult> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(CommandResult::new(
            CommandSummary::Init(InitSummary {
                path: config_path,
                created: false,
            }),
            vec![Failure::usage(CONFIG_FILE_NAME, format!("{} already exists", CONFIG_FILE_NAME))],
        ));
    }

    fs::write(&config_path, default_config_json()?)?;
    Ok(CommandResult::new(
        CommandSummary::Init(InitSummary {
            path: config_path,
            created: true,
        }),
        Vec::new(),
    ))
}
