use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): every document translated
/// - `Usage` (1): bad invocation (missing input, config already exists, ...)
/// - `Translation` (2): a line failed to translate
/// - `Error` (3): unexpected failure (I/O, invalid config, ...)
/// - `ForbiddenWord` (4): a document contained a deny-listed identifier
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Usage,
    Translation,
    Error,
    ForbiddenWord,
}

impl ExitStatus {
    pub fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Usage => 1,
            ExitStatus::Translation => 2,
            ExitStatus::Error => 3,
            ExitStatus::ForbiddenWord => 4,
        }
    }

    /// The more severe of two statuses; severity follows the exit code.
    pub fn max(self, other: ExitStatus) -> ExitStatus {
        if other.code() > self.code() {
            other
        } else {
            self
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
