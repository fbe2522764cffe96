//! Error types produced by the translation engine.
//!
//! - [`TranslateError`]: returned by [`Translator::translate`](super::Translator::translate).
//!   Either the whole document was rejected by the forbidden-word guard, or a
//!   specific line failed and carries its 1-based line number.
//! - [`SemanticError`]: a well-formed but invalid construct detected by a pass.
//! - [`RuleError`]: the rule table itself is invalid (raised while building it).

use thiserror::Error;

use super::rules::RuleCategory;

/// Coarse classification used by callers to choose an exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A deny-listed identifier appeared in the raw document.
    ForbiddenWord,
    /// A line failed to translate (DSL error wrapping a semantic error).
    Dsl,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ForbiddenWord => write!(f, "forbidden-word"),
            ErrorKind::Dsl => write!(f, "semantic"),
        }
    }
}

/// A call whose top-level argument count exceeds what its constructor accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{call} accepts at most {max} arguments, found {found}: {arguments}")]
pub struct SemanticError {
    /// Callee as written in the source (e.g. `Color3_nuevo`).
    pub call: String,
    /// Raw argument text between the parentheses, trimmed.
    pub arguments: String,
    pub max: usize,
    pub found: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// Raised before any rewriting happens.
    #[error("forbidden word '{token}' found on line {line} of {label}")]
    ForbiddenWord {
        token: String,
        line: usize,
        /// 1-based byte column of the first occurrence.
        column: usize,
        label: String,
    },

    /// Line-context wrapper; the root cause is kept as the error source.
    #[error("error processing line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: SemanticError,
    },
}

impl TranslateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranslateError::ForbiddenWord { .. } => ErrorKind::ForbiddenWord,
            TranslateError::Line { .. } => ErrorKind::Dsl,
        }
    }

    /// 1-based line the error points at.
    pub fn line(&self) -> usize {
        match self {
            TranslateError::ForbiddenWord { line, .. } | TranslateError::Line { line, .. } => *line,
        }
    }
}

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("duplicate {category} rule for '{token}'")]
    DuplicateToken {
        category: RuleCategory,
        token: String,
    },

    #[error("'{token}' is not a valid {category} identifier")]
    InvalidToken {
        category: RuleCategory,
        token: String,
    },

    #[error("failed to compile {category} matcher: {source}")]
    Matcher {
        category: RuleCategory,
        #[source]
        source: Box<regex::Error>,
    },

    #[error("failed to compile forbidden-word matcher: {0}")]
    DenyList(#[source] Box<regex::Error>),
}
