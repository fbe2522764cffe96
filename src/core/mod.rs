//! Translation engine.
//!
//! ```text
//! document ─► ForbiddenWordGuard ─► per line: partition_line ─► Pipeline ─► join
//! ```
//!
//! - [`rules`]: the token → expansion table, injected into [`Translator::new`]
//! - [`literal`]: splits a line into code and literal segments
//! - [`guard`]: rejects documents containing deny-listed identifiers
//! - [`passes`]: the six ordered substitution passes
//! - [`driver`]: the [`Translator`] that ties them together

pub mod driver;
pub mod error;
pub mod guard;
pub mod literal;
pub mod passes;
pub mod rules;

pub use driver::Translator;
pub use error::{ErrorKind, RuleError, SemanticError, TranslateError};
pub use guard::{DEFAULT_FORBIDDEN_WORDS, ForbiddenWordGuard};
pub use rules::{RuleCategory, RuleTable, TranslationRule, default_rules};
