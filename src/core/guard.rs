//! Forbidden-token guard.
//!
//! Runs once over the raw, untranslated document. Matching is a
//! case-insensitive *substring* search: tokens inside qualified names, string
//! literals and comments are rejected too. The first offending line fails, and
//! on that line the earliest deny-list entry is reported, whatever its column.

use regex::{Regex, RegexBuilder, RegexSet, RegexSetBuilder};

use super::error::TranslateError;

/// Identifiers that may never appear in a Vox document.
pub const DEFAULT_FORBIDDEN_WORDS: &[&str] = &[
    "loadstring",
    "getfenv",
    "setfenv",
    "rawget",
    "rawset",
    "rawequal",
    "newproxy",
    "debug",
    "collectgarbage",
    "dofile",
    "require",
    "package",
    "module",
    "coroutine",
    "PostAsync",
    "RequestAsync",
];

#[derive(Debug, Clone)]
pub struct ForbiddenWordGuard {
    words: Vec<String>,
    /// Line prefilter; index `i` is `words[i]`.
    any: RegexSet,
    /// One matcher per word, for the reported column.
    each: Vec<Regex>,
}

impl ForbiddenWordGuard {
    /// Build a guard from the default deny-list plus `extra` entries.
    pub fn new<I, S>(extra: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = DEFAULT_FORBIDDEN_WORDS
            .iter()
            .map(|w| w.to_string())
            .collect();
        for word in extra {
            let word = word.as_ref().trim();
            if !word.is_empty() && !words.iter().any(|w| w.eq_ignore_ascii_case(word)) {
                words.push(word.to_string());
            }
        }

        let patterns: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
        let any = RegexSetBuilder::new(&patterns)
            .case_insensitive(true)
            .build()?;
        let each = patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { words, any, each })
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Fail on the first line containing a deny-listed token.
    pub fn check(&self, document: &str, label: &str) -> Result<(), TranslateError> {
        for (idx, line) in document.split('\n').enumerate() {
            let Some(word) = self.any.matches(line).iter().next() else {
                continue;
            };
            let Some(found) = self.each[word].find(line) else {
                continue;
            };

            let token = self.words[word].clone();
            tracing::debug!(token = %token, line = idx + 1, "forbidden word rejected");
            return Err(TranslateError::ForbiddenWord {
                token,
                line: idx + 1,
                column: found.start() + 1,
                label: label.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn guard() -> ForbiddenWordGuard {
        ForbiddenWordGuard::new(Vec::<String>::new()).unwrap()
    }

    #[test]
    fn test_clean_document_passes() {
        guard()
            .check("si x entonces\n  imprimir(\"hola\")\nfin", "ok.vox")
            .unwrap();
    }

    #[test]
    fn test_forbidden_inside_literal() {
        let err = guard()
            .check("local a = 1\nimprimir(\"loadstring\")", "main.vox")
            .unwrap_err();

        assert_eq!(
            err,
            TranslateError::ForbiddenWord {
                token: "loadstring".to_string(),
                line: 2,
                column: 11,
                label: "main.vox".to_string(),
            }
        );
    }

    #[test]
    fn test_case_insensitive_substring() {
        let err = guard().check("local x = mydebugger", "a.vox").unwrap_err();
        assert!(matches!(err, TranslateError::ForbiddenWord { ref token, .. } if token == "debug"));

        let err = guard()
            .check("http:postasync(url)", "a.vox")
            .unwrap_err();
        assert!(matches!(err, TranslateError::ForbiddenWord { ref token, .. } if token == "PostAsync"));
    }

    #[test]
    fn test_first_offending_line_wins() {
        let err = guard()
            .check("a = 1\nrequire(x)\ngetfenv()", "a.vox")
            .unwrap_err();
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_deny_list_order_decides_within_a_line() {
        let err = guard().check("x = require(loadstring)", "a.vox").unwrap_err();

        assert_eq!(
            err,
            TranslateError::ForbiddenWord {
                token: "loadstring".to_string(),
                line: 1,
                column: 13,
                label: "a.vox".to_string(),
            }
        );
    }

    #[test]
    fn test_extra_words_extend_defaults() {
        let guard = ForbiddenWordGuard::new(["Teleport", "LOADSTRING"]).unwrap();

        assert_eq!(guard.words().len(), DEFAULT_FORBIDDEN_WORDS.len() + 1);
        let err = guard.check("servicio:teleport(x)", "a.vox").unwrap_err();
        assert!(matches!(err, TranslateError::ForbiddenWord { ref token, .. } if token == "Teleport"));
    }
}
