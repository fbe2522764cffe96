use std::path::PathBuf;

use super::super::exit_status::ExitStatus;
use crate::core::{ErrorKind, TranslateError};

#[derive(Debug)]
pub enum CommandSummary {
    Translate(TranslateSummary),
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct TranslateSummary {
    pub input: PathBuf,
    /// `None` until the translation succeeded.
    pub output: Option<TranslateOutput>,
}

#[derive(Debug)]
pub enum TranslateOutput {
    File(PathBuf),
    Stdout(String),
}

#[derive(Debug)]
pub struct CheckSummary {
    pub files_checked: usize,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    pub created: bool,
}

/// Result of running vox commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Sorted by path, then line.
    pub failures: Vec<Failure>,
}

impl CommandResult {
    pub fn new(summary: CommandSummary, mut failures: Vec<Failure>) -> Self {
        failures.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.line().cmp(&b.line()))
        });
        Self { summary, failures }
    }

    /// The most severe status among all failures.
    pub fn exit_status(&self) -> ExitStatus {
        self.failures
            .iter()
            .map(Failure::exit_status)
            .fold(ExitStatus::Success, ExitStatus::max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Translate(ErrorKind),
    Usage,
    Io,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Translate(kind) => write!(f, "{kind}"),
            FailureKind::Usage => write!(f, "usage"),
            FailureKind::Io => write!(f, "io"),
        }
    }
}

/// Where in a document a failure points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureLocation {
    pub line: usize,
    /// 1-based character column.
    pub col: usize,
    pub source_line: String,
}

/// One file that could not be translated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub path: String,
    pub kind: FailureKind,
    pub message: String,
    pub location: Option<FailureLocation>,
}

impl Failure {
    pub fn usage(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: FailureKind::Usage,
            message: message.into(),
            location: None,
        }
    }

    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self {
            path: path.into(),
            kind: FailureKind::Io,
            message: err.to_string(),
            location: None,
        }
    }

    /// Attach the offending source line of `document` to a translation error.
    pub fn translation(path: impl Into<String>, document: &str, err: &TranslateError) -> Self {
        let line = err.line();
        let location = document.split('\n').nth(line.saturating_sub(1)).map(|text| {
            let text = text.strip_suffix('\r').unwrap_or(text);
            let byte = match err {
                TranslateError::ForbiddenWord { column, .. } => column.saturating_sub(1),
                TranslateError::Line { source, .. } => text.find(&source.call).unwrap_or(0),
            };
            let col = text.get(..byte).map_or(1, |prefix| prefix.chars().count() + 1);
            FailureLocation {
                line,
                col,
                source_line: text.to_string(),
            }
        });

        Self {
            path: path.into(),
            kind: FailureKind::Translate(err.kind()),
            message: err.to_string(),
            location,
        }
    }

    pub fn line(&self) -> usize {
        self.location.as_ref().map_or(0, |loc| loc.line)
    }

    pub fn exit_status(&self) -> ExitStatus {
        match self.kind {
            FailureKind::Translate(ErrorKind::ForbiddenWord) => ExitStatus::ForbiddenWord,
            FailureKind::Translate(ErrorKind::Dsl) => ExitStatus::Translation,
            FailureKind::Usage => ExitStatus::Usage,
            FailureKind::Io => ExitStatus::Error,
        }
    }
}
