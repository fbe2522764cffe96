//! The substitution pipeline.
//!
//! Six passes run in the fixed order given by [`PIPELINE_ORDER`]. Each pass
//! owns one or more rule categories, compiles one matcher per category up
//! front, and rewrites a code segment into a new code segment. Later passes
//! assume earlier ones already ran:
//!
//! 1. services: `obtener_servicio("jugadores")` → `game:GetService("Players")`
//! 2. methods: `:esperar_hijo(` → `:WaitForChild(`
//! 3. constructors: `Color3_nuevo(` → `Color3.new(` (plus the arity check)
//! 4. properties: `.texto` → `.Text`, `math.piso` → `math.floor`
//! 5. enums: `estilo_suavizado.Quad` → `Enum.EasingStyle.Quad`
//! 6. keywords: `si ... entonces ... fin` → `if ... then ... end`
//!
//! The syntactically specific passes run first; the keyword pass is the least
//! specific and would otherwise eat pieces of multi-word tokens.

mod arity;
mod constructors;
mod enums;
mod keywords;
mod methods;
mod properties;
mod services;

use std::collections::HashMap;

use enum_dispatch::enum_dispatch;
use regex::{Captures, Regex};

use super::error::{RuleError, SemanticError};
use super::literal::Segment;
use super::rules::{RuleCategory, RuleTable};

pub use constructors::ConstructorPass;
pub use enums::EnumPass;
pub use keywords::KeywordPass;
pub use methods::MethodPass;
pub use properties::PropertyPass;
pub use services::ServicePass;

/// Identifies a pass; the pipeline is built from [`PIPELINE_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassId {
    Services,
    Methods,
    Constructors,
    Properties,
    Enums,
    Keywords,
}

impl std::fmt::Display for PassId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PassId::Services => write!(f, "services"),
            PassId::Methods => write!(f, "methods"),
            PassId::Constructors => write!(f, "constructors"),
            PassId::Properties => write!(f, "properties"),
            PassId::Enums => write!(f, "enums"),
            PassId::Keywords => write!(f, "keywords"),
        }
    }
}

pub const PIPELINE_ORDER: [PassId; 6] = [
    PassId::Services,
    PassId::Methods,
    PassId::Constructors,
    PassId::Properties,
    PassId::Enums,
    PassId::Keywords,
];

/// One rewriting stage of the pipeline.
///
/// Uses `enum_dispatch` so [`PassKind`] dispatches without trait objects.
#[enum_dispatch]
pub trait Pass {
    fn id(&self) -> PassId;

    /// Rewrite one code segment.
    fn apply(&self, code: &str) -> Result<String, SemanticError>;

    /// Inspect the whole line before any code segment is rewritten.
    ///
    /// Only the service pass needs this: its string argument lives in a
    /// literal segment next to the accessor call.
    fn prepare(&self, _segments: &mut [Segment]) {}
}

#[enum_dispatch(Pass)]
#[derive(Debug, Clone)]
pub enum PassKind {
    Services(ServicePass),
    Methods(MethodPass),
    Constructors(ConstructorPass),
    Properties(PropertyPass),
    Enums(EnumPass),
    Keywords(KeywordPass),
}

/// The compiled passes, in pipeline order.
#[derive(Debug, Clone)]
pub struct Pipeline {
    passes: Vec<PassKind>,
}

impl Pipeline {
    pub fn new(rules: &RuleTable) -> Result<Self, RuleError> {
        let passes = PIPELINE_ORDER
            .iter()
            .map(|id| build_pass(*id, rules))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { passes })
    }

    pub fn order(&self) -> Vec<PassId> {
        self.passes.iter().map(Pass::id).collect()
    }

    /// Rewrite every code segment of one line in place. Literal segments are
    /// left untouched (apart from the service name argument, see
    /// [`ServicePass`]).
    pub fn run(&self, segments: &mut [Segment]) -> Result<(), SemanticError> {
        for pass in &self.passes {
            pass.prepare(segments);
        }

        for segment in segments.iter_mut().filter(|s| s.is_code()) {
            if segment.text.trim().is_empty() {
                continue;
            }
            let mut code = segment.text.clone();
            for pass in &self.passes {
                let rewritten = pass.apply(&code)?;
                if rewritten != code {
                    tracing::trace!(pass = %pass.id(), before = %code, after = %rewritten, "rewrote segment");
                }
                code = rewritten;
            }
            segment.text = code;
        }
        Ok(())
    }
}

fn build_pass(id: PassId, rules: &RuleTable) -> Result<PassKind, RuleError> {
    Ok(match id {
        PassId::Services => ServicePass::new(rules)?.into(),
        PassId::Methods => MethodPass::new(rules)?.into(),
        PassId::Constructors => ConstructorPass::new(rules)?.into(),
        PassId::Properties => PropertyPass::new(rules)?.into(),
        PassId::Enums => EnumPass::new(rules)?.into(),
        PassId::Keywords => KeywordPass::new(rules)?.into(),
    })
}

// ============================================================
// Matching helpers shared by the passes
// ============================================================

/// Case-insensitive token → target lookup for one category.
#[derive(Debug, Clone, Default)]
struct Targets(HashMap<String, String>);

impl Targets {
    fn new(rules: &RuleTable, category: RuleCategory) -> Self {
        Self(
            rules
                .rules(category)
                .iter()
                .map(|rule| (rule.source.to_lowercase(), rule.target.clone()))
                .collect(),
        )
    }

    fn get(&self, token: &str) -> Option<&str> {
        self.0.get(&token.to_lowercase()).map(String::as_str)
    }
}

/// Regex alternation over a category's tokens, longest first.
///
/// Returns `None` for an empty category; an empty alternation would match
/// everywhere.
fn token_alternation(rules: &RuleTable, category: RuleCategory) -> Option<String> {
    let mut tokens: Vec<&str> = rules
        .rules(category)
        .iter()
        .map(|rule| rule.source.as_str())
        .collect();
    if tokens.is_empty() {
        return None;
    }
    tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    Some(
        tokens
            .iter()
            .map(|token| regex::escape(token))
            .collect::<Vec<_>>()
            .join("|"),
    )
}

/// Compile `template` with `{}` replaced by the category's alternation.
fn category_matcher(
    rules: &RuleTable,
    category: RuleCategory,
    template: &str,
) -> Result<Option<Regex>, RuleError> {
    token_alternation(rules, category)
        .map(|alternation| compile(category, &template.replace("{}", &alternation)))
        .transpose()
}

fn compile(category: RuleCategory, pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(pattern).map_err(|source| RuleError::Matcher {
        category,
        source: Box::new(source),
    })
}

/// Replace every match of `re` in `text`.
///
/// `replace` receives the captures and the text preceding the match, and
/// returns `None` to keep the match as written.
fn rewrite<F>(re: &Regex, text: &str, mut replace: F) -> String
where
    F: FnMut(&Captures<'_>, &str) -> Option<String>,
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if let Some(replacement) = replace(&caps, &text[..whole.start()]) {
            out.push_str(&text[last..whole.start()]);
            out.push_str(&replacement);
            last = whole.end();
        }
    }
    out.push_str(&text[last..]);
    out
}

/// True when the token right after `before` is a member name (`obj.x`, `obj:x`)
/// rather than a free identifier. The `..` concatenation operator does not count.
fn is_member_access(before: &str) -> bool {
    if before.ends_with("..") {
        return false;
    }
    before.ends_with('.') || before.ends_with(':')
}
