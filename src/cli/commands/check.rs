use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Result;
use rayon::prelude::*;

use super::super::args::CheckCommand;
use super::helper::TranslateContext;
use super::scan::scan_files;
use super::{CheckSummary, CommandResult, CommandSummary, Failure};
use crate::core::Translator;

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = TranslateContext::load()?;
    let (includes, ignores) = ctx.config.patterns()?;

    let roots = if cmd.paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        cmd.paths
    };
    let scan = scan_files(&roots, &includes, &ignores);
    tracing::debug!(files = scan.files.len(), "collected files");

    let mut failures: Vec<Failure> = scan
        .missing
        .iter()
        .map(|path| Failure::usage(path.display().to_string(), "path not found"))
        .collect();

    let files: Vec<&PathBuf> = scan.files.iter().collect();
    let translated: Vec<Failure> = files
        .par_iter()
        .filter_map(|path| check_file(&ctx.translator, path))
        .collect();
    failures.extend(translated);

    Ok(CommandResult::new(
        CommandSummary::Check(CheckSummary {
            files_checked: files.len(),
        }),
        failures,
    ))
}

/// Translate one file in memory; nothing is written.
fn check_file(translator: &Translator, path: &Path) -> Option<Failure> {
    let label = display_path(path);
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => return Some(Failure::io(label, &err)),
    };

    translator
        .translate(&source, &label)
        .err()
        .map(|err| Failure::translation(label, &source, &err))
}

/// `./src/a.vox` → `src/a.vox`.
fn display_path(path: &Path) -> String {
    let path = path.strip_prefix(".").unwrap_or(path);
    path.display().to_string().replace('\\', "/")
}
