//! The rule table: static mapping from Vox tokens to Roblox Lua expansions.
//!
//! Rules are partitioned by [`RuleCategory`]; each pipeline pass owns one or
//! more categories and decides what surrounding syntax must be present for a
//! rule to fire. The table is plain data. It is built once (defaults plus any
//! configuration overrides), handed to [`Translator::new`](super::Translator::new)
//! and never mutated afterwards.
//!
//! Tokens are unique per category under case-insensitive comparison. The same
//! token may appear in several categories (`piso` is not a keyword but
//! `math.piso` is a math function); pass order and positional context pick
//! the right one.

mod defaults;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::RuleError;

pub use defaults::default_rules;

/// Which pass owns a rule and what syntax it requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleCategory {
    /// Standalone structural keyword (`si`, `fin`, `nulo`, ...).
    Keyword,
    /// Global function, only rewritten when followed by `(`.
    GlobalFunction,
    /// Method name, only rewritten after `:` and before `(`.
    MethodName,
    /// Constructor override for the `Name_nuevo(` suffix convention.
    ConstructorName,
    /// Member name, only rewritten after a single `.`.
    PropertyName,
    /// Member of the `math` library, only rewritten after `math.`.
    MathFunction,
    /// Service name accepted by the service accessor.
    ServiceName,
    /// Spanish enum family resolved to its `Enum.X` path.
    EnumFamily,
    /// Registered `familia.Miembro` pair, resolved under its family's path.
    EnumMember,
    /// Bare enumerated constant resolved to its fully qualified path.
    EnumConstant,
}

impl RuleCategory {
    pub const ALL: [RuleCategory; 10] = [
        RuleCategory::Keyword,
        RuleCategory::GlobalFunction,
        RuleCategory::MethodName,
        RuleCategory::ConstructorName,
        RuleCategory::PropertyName,
        RuleCategory::MathFunction,
        RuleCategory::ServiceName,
        RuleCategory::EnumFamily,
        RuleCategory::EnumMember,
        RuleCategory::EnumConstant,
    ];
}

impl std::fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleCategory::Keyword => write!(f, "keyword"),
            RuleCategory::GlobalFunction => write!(f, "global-function"),
            RuleCategory::MethodName => write!(f, "method"),
            RuleCategory::ConstructorName => write!(f, "constructor"),
            RuleCategory::PropertyName => write!(f, "property"),
            RuleCategory::MathFunction => write!(f, "math-function"),
            RuleCategory::ServiceName => write!(f, "service"),
            RuleCategory::EnumFamily => write!(f, "enum-family"),
            RuleCategory::EnumMember => write!(f, "enum-member"),
            RuleCategory::EnumConstant => write!(f, "enum-constant"),
        }
    }
}

/// One source token and its expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRule {
    pub source: String,
    /// Replacement text. May be a qualified path (`Enum.Material.Neon`,
    /// `game:GetService`) or an inline function template.
    pub target: String,
    pub category: RuleCategory,
    /// Upper bound on top-level call arguments, checked by the constructor pass.
    pub max_arity: Option<usize>,
}

impl TranslationRule {
    pub fn new(category: RuleCategory, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            category,
            max_arity: None,
        }
    }

    pub fn with_max_arity(mut self, max_arity: usize) -> Self {
        self.max_arity = Some(max_arity);
        self
    }
}

/// Immutable-after-construction set of translation rules.
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    categories: BTreeMap<RuleCategory, Vec<TranslationRule>>,
}

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, rejecting a token already present in its category.
    pub fn insert(&mut self, rule: TranslationRule) -> Result<(), RuleError> {
        validate_token(&rule)?;
        if self.lookup(rule.category, &rule.source).is_some() {
            return Err(RuleError::DuplicateToken {
                category: rule.category,
                token: rule.source,
            });
        }
        self.categories.entry(rule.category).or_default().push(rule);
        Ok(())
    }

    /// Add a rule, replacing any case-insensitively equal token in its category.
    ///
    /// Used for configuration overrides. An existing arity bound is kept unless
    /// the new rule carries its own.
    pub fn upsert(&mut self, mut rule: TranslationRule) -> Result<(), RuleError> {
        validate_token(&rule)?;
        let wanted = rule.source.to_lowercase();
        let rules = self.categories.entry(rule.category).or_default();
        match rules
            .iter_mut()
            .find(|existing| existing.source.to_lowercase() == wanted)
        {
            Some(existing) => {
                if rule.max_arity.is_none() {
                    rule.max_arity = existing.max_arity;
                }
                *existing = rule;
            }
            None => rules.push(rule),
        }
        Ok(())
    }

    /// Append without checks; the built-in tables are covered by `validate` in tests.
    pub(super) fn push_unchecked(&mut self, rule: TranslationRule) {
        self.categories.entry(rule.category).or_default().push(rule);
    }

    /// Rules of one category, in insertion order.
    pub fn rules(&self, category: RuleCategory) -> &[TranslationRule] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Case-insensitive lookup within a category.
    pub fn lookup(&self, category: RuleCategory, token: &str) -> Option<&TranslationRule> {
        let wanted = token.to_lowercase();
        self.rules(category)
            .iter()
            .find(|rule| rule.source.to_lowercase() == wanted)
    }

    /// Target expansion for a token, if the category has one.
    pub fn target(&self, category: RuleCategory, token: &str) -> Option<&str> {
        self.lookup(category, token).map(|rule| rule.target.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-check the per-category invariants over the whole table.
    pub fn validate(&self) -> Result<(), RuleError> {
        for (category, rules) in &self.categories {
            let mut seen = std::collections::HashSet::new();
            for rule in rules {
                validate_token(rule)?;
                if !seen.insert(rule.source.to_lowercase()) {
                    return Err(RuleError::DuplicateToken {
                        category: *category,
                        token: rule.source.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Tokens must be plain identifiers so that word-boundary matching is sound.
/// Enum members are the one exception: `familia.Miembro`, two identifiers.
fn validate_token(rule: &TranslationRule) -> Result<(), RuleError> {
    let valid = match rule.category {
        RuleCategory::EnumMember => rule
            .source
            .split_once('.')
            .is_some_and(|(family, member)| is_identifier(family) && is_identifier(member)),
        _ => is_identifier(&rule.source),
    };

    if valid && !rule.target.is_empty() {
        Ok(())
    } else {
        Err(RuleError::InvalidToken {
            category: rule.category,
            token: rule.source.clone(),
        })
    }
}

fn is_identifier(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_rules_are_valid() {
        let table = default_rules();
        table.validate().unwrap();
        for category in RuleCategory::ALL {
            assert!(
                !table.rules(category).is_empty(),
                "category {category} should have default rules"
            );
        }
    }

    #[test]
    fn test_insert_rejects_case_insensitive_duplicate() {
        let mut table = RuleTable::new();
        table
            .insert(TranslationRule::new(RuleCategory::Keyword, "fin", "end"))
            .unwrap();

        let err = table
            .insert(TranslationRule::new(RuleCategory::Keyword, "FIN", "end"))
            .unwrap_err();

        assert!(matches!(err, RuleError::DuplicateToken { .. }));
    }

    #[test]
    fn test_same_token_allowed_across_categories() {
        let mut table = RuleTable::new();
        table
            .insert(TranslationRule::new(RuleCategory::Keyword, "esperar", "wait"))
            .unwrap();
        table
            .insert(TranslationRule::new(RuleCategory::MethodName, "esperar", "Wait"))
            .unwrap();

        assert_eq!(table.target(RuleCategory::Keyword, "esperar"), Some("wait"));
        assert_eq!(table.target(RuleCategory::MethodName, "esperar"), Some("Wait"));
    }

    #[test]
    fn test_insert_rejects_non_identifier() {
        let mut table = RuleTable::new();

        let err = table
            .insert(TranslationRule::new(RuleCategory::Keyword, "sino si", "elseif"))
            .unwrap_err();

        assert!(matches!(err, RuleError::InvalidToken { .. }));
    }

    #[test]
    fn test_enum_members_are_qualified_pairs() {
        let mut table = RuleTable::new();
        table
            .insert(TranslationRule::new(RuleCategory::EnumMember, "fuente.Arial", "Arial"))
            .unwrap();
        table
            .insert(TranslationRule::new(RuleCategory::EnumMember, "tipo_parte.Block", "Block"))
            .unwrap();

        for bad in ["Arial", "fuente.", "a.b.c", ".Arial"] {
            let err = table
                .insert(TranslationRule::new(RuleCategory::EnumMember, bad, "Arial"))
                .unwrap_err();
            assert!(matches!(err, RuleError::InvalidToken { .. }), "{bad} should be rejected");
        }

        let err = table
            .insert(TranslationRule::new(RuleCategory::Keyword, "fuente.Arial", "x"))
            .unwrap_err();
        assert!(matches!(err, RuleError::InvalidToken { .. }));
    }

    #[test]
    fn test_upsert_replaces_and_keeps_arity() {
        let mut table = default_rules();
        let before = table.len();

        table
            .upsert(TranslationRule::new(RuleCategory::ConstructorName, "color3", "Color3"))
            .unwrap();
        table
            .upsert(TranslationRule::new(RuleCategory::Keyword, "mostrar", "print"))
            .unwrap();

        assert_eq!(table.len(), before + 1);
        let color = table.lookup(RuleCategory::ConstructorName, "Color3").unwrap();
        assert_eq!(color.source, "color3");
        assert_eq!(color.max_arity, Some(3));
        assert_eq!(table.target(RuleCategory::Keyword, "mostrar"), Some("print"));
    }
}
