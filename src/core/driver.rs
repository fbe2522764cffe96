//! Line driver: guard, partition, rewrite, reassemble.

use super::error::{RuleError, SemanticError, TranslateError};
use super::guard::ForbiddenWordGuard;
use super::literal::partition_line;
use super::passes::Pipeline;
use super::rules::{RuleTable, default_rules};

/// A compiled translator.
///
/// Holds the rule table and every compiled matcher. Building one is the
/// expensive part; translating is cheap and never mutates the translator, so
/// one instance can be shared across threads.
#[derive(Debug, Clone)]
pub struct Translator {
    rules: RuleTable,
    guard: ForbiddenWordGuard,
    pipeline: Pipeline,
}

impl Translator {
    pub fn new(rules: RuleTable) -> Result<Self, RuleError> {
        Self::with_forbidden_words(rules, std::iter::empty::<&str>())
    }

    /// Like [`Translator::new`], extending the default deny-list with `extra`.
    pub fn with_forbidden_words<I, S>(rules: RuleTable, extra: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        rules.validate()?;
        let guard = ForbiddenWordGuard::new(extra).map_err(|e| RuleError::DenyList(Box::new(e)))?;
        let pipeline = Pipeline::new(&rules)?;
        tracing::debug!(rules = rules.len(), forbidden = guard.words().len(), "built translator");
        Ok(Self {
            rules,
            guard,
            pipeline,
        })
    }

    pub fn with_default_rules() -> Result<Self, RuleError> {
        Self::new(default_rules())
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn forbidden_words(&self) -> &[String] {
        self.guard.words()
    }

    /// Translate a whole document.
    ///
    /// `label` names the document in error messages (usually its path). The
    /// output has exactly as many lines as the input.
    pub fn translate(&self, document: &str, label: &str) -> Result<String, TranslateError> {
        self.guard.check(document, label)?;

        let mut session = TranslationSession::new(label);
        for (idx, line) in document.split('\n').enumerate() {
            let translated = self
                .translate_line(line)
                .map_err(|source| TranslateError::Line {
                    line: idx + 1,
                    source,
                })?;
            session.push(translated);
        }
        Ok(session.finish())
    }

    /// Translate one line without the forbidden-word guard.
    pub fn translate_line(&self, line: &str) -> Result<String, SemanticError> {
        if line.trim().is_empty() {
            return Ok(line.to_string());
        }
        let mut segments = partition_line(line);
        self.pipeline.run(&mut segments)?;
        Ok(segments.into_iter().map(|s| s.text).collect())
    }
}

/// Per-call state of one `translate` call.
struct TranslationSession<'a> {
    label: &'a str,
    lines: Vec<String>,
}

impl<'a> TranslationSession<'a> {
    fn new(label: &'a str) -> Self {
        Self {
            label,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    fn finish(self) -> String {
        tracing::debug!(label = self.label, lines = self.lines.len(), "translated document");
        self.lines.join("\n")
    }
}
