//! Pass 3: constructors.
//!
//! - `Nombre_nuevo(` → `Nombre.new(`, with `ConstructorName` rules overriding
//!   the type name (`secuencia_color_nuevo(` → `ColorSequence.new(`).
//! - `instancia_nueva(` → `Instance.new(`.
//!
//! Arity is validated before anything is rewritten, against both the Vox and
//! the target spelling of each bounded constructor.

use regex::Regex;

use super::arity::ArityRule;
use super::{Pass, PassId, Targets, compile, rewrite};
use crate::core::error::{RuleError, SemanticError};
use crate::core::rules::{RuleCategory, RuleTable};

const INSTANCE_FACTORY: &str = "instancia_nueva";
const INSTANCE_NEW: &str = "Instance.new(";

#[derive(Debug, Clone)]
pub struct ConstructorPass {
    overrides: Targets,
    arity: Vec<ArityRule>,
    suffixed: Regex,
    instance: Regex,
}

impl ConstructorPass {
    pub fn new(rules: &RuleTable) -> Result<Self, RuleError> {
        let category = RuleCategory::ConstructorName;
        let arity = rules
            .rules(category)
            .iter()
            .filter_map(|rule| rule.max_arity.map(|max| (rule, max)))
            .map(|(rule, max)| {
                let pattern = format!(
                    r"\b(?:{}_nuevo|{}\.new)\s*\(",
                    regex::escape(&rule.source),
                    regex::escape(&rule.target)
                );
                Ok(ArityRule {
                    call: compile(category, &pattern)?,
                    max,
                })
            })
            .collect::<Result<Vec<_>, RuleError>>()?;

        Ok(Self {
            overrides: Targets::new(rules, category),
            arity,
            suffixed: compile(category, r"\b(\w+)_nuevo\s*\(")?,
            instance: compile(category, &format!(r"\b{INSTANCE_FACTORY}\s*\("))?,
        })
    }
}

impl Pass for ConstructorPass {
    fn id(&self) -> PassId {
        PassId::Constructors
    }

    fn apply(&self, code: &str) -> Result<String, SemanticError> {
        for rule in &self.arity {
            rule.check(code)?;
        }

        let code = rewrite(&self.suffixed, code, |caps, _| {
            let name = &caps[1];
            let type_name = self.overrides.get(name).unwrap_or(name);
            Some(format!("{type_name}.new("))
        });
        Ok(self.instance.replace_all(&code, INSTANCE_NEW).into_owned())
    }
}
