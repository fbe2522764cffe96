//! Arity validator used by the constructor pass.
//!
//! Purely syntactic: arguments are counted by splitting on top-level commas
//! and never evaluated.

use regex::Regex;

use crate::core::error::SemanticError;

/// A constructor with an upper bound on its argument count.
#[derive(Debug, Clone)]
pub(super) struct ArityRule {
    /// Matches both the Vox form and the target form up to the `(`.
    pub call: Regex,
    pub max: usize,
}

impl ArityRule {
    /// Fail on the first call in `code` with more than `max` arguments.
    pub fn check(&self, code: &str) -> Result<(), SemanticError> {
        for call in self.call.find_iter(code) {
            let (found, arguments) = count_arguments(&code[call.end()..]);
            if found > self.max {
                return Err(SemanticError {
                    call: callee(call.as_str()).to_string(),
                    arguments: arguments.trim().to_string(),
                    max: self.max,
                    found,
                });
            }
        }
        Ok(())
    }
}

/// Count the top-level arguments at the start of `args` (text right after the
/// opening parenthesis).
///
/// Scanning stops at the matching `)` or at the end of the text, since a call
/// may continue past a string literal that was split into its own segment.
/// Returns the count and the scanned argument text.
pub fn count_arguments(args: &str) -> (usize, &str) {
    let mut depth = 0usize;
    let mut commas = 0;
    let mut end = args.len();

    for (idx, ch) in args.char_indices() {
        match ch {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' if depth == 0 => {
                end = idx;
                break;
            }
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => commas += 1,
            _ => {}
        }
    }

    let scanned = &args[..end];
    let count = if commas == 0 && scanned.trim().is_empty() {
        0
    } else {
        commas + 1
    };
    (count, scanned)
}

/// `"Color3_nuevo ("` → `"Color3_nuevo"`.
fn callee(matched: &str) -> &str {
    matched.trim_end_matches('(').trim_end()
}
