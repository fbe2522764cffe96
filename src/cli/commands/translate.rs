use std::fs;

use anyhow::{Context, Result};

use super::super::args::TranslateCommand;
use super::helper::TranslateContext;
use super::{CommandResult, CommandSummary, Failure, TranslateOutput, TranslateSummary};

pub fn translate(cmd: TranslateCommand) -> Result<CommandResult> {
    let input = cmd.input;
    let label = input.display().to_string();
    let mut summary = TranslateSummary {
        input: input.clone(),
        output: None,
    };

    if !input.is_file() {
        return Ok(CommandResult::new(
            CommandSummary::Translate(summary),
            vec![Failure::usage(label, "input file not found")],
        ));
    }

    let ctx = TranslateContext::load()?;
    let output_path = match (&cmd.output, cmd.stdout) {
        (_, true) => None,
        (Some(path), false) => Some(path.clone()),
        (None, false) => Some(input.with_extension(ctx.config.output_extension())),
    };
    if output_path.as_deref() == Some(input.as_path()) {
        return Ok(CommandResult::new(
            CommandSummary::Translate(summary),
            vec![Failure::usage(label, "output would overwrite the input file")],
        ));
    }

    let source = match fs::read_to_string(&input) {
        Ok(source) => source,
        Err(err) => {
            return Ok(CommandResult::new(
                CommandSummary::Translate(summary),
                vec![Failure::io(label, &err)],
            ));
        }
    };

    let translated = match ctx.translator.translate(&source, &label) {
        Ok(translated) => translated,
        Err(err) => {
            tracing::debug!(input = %label, error = %err, "translation failed");
            let failure = Failure::translation(label, &source, &err);
            return Ok(CommandResult::new(
                CommandSummary::Translate(summary),
                vec![failure],
            ));
        }
    };

    summary.output = Some(match output_path {
        Some(path) => {
            fs::write(&path, &translated)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            TranslateOutput::File(path)
        }
        None => TranslateOutput::Stdout(translated),
    });

    Ok(CommandResult::new(CommandSummary::Translate(summary), Vec::new()))
}
