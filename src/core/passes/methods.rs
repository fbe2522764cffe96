//! Pass 2: method names.
//!
//! `objeto:esperar_hijo("Part")` → `objeto:WaitForChild("Part")`. Fires only
//! between a `:` and an opening parenthesis, whatever the receiver is.

use regex::Regex;

use super::{Pass, PassId, Targets, category_matcher, rewrite};
use crate::core::error::{RuleError, SemanticError};
use crate::core::rules::{RuleCategory, RuleTable};

#[derive(Debug, Clone)]
pub struct MethodPass {
    methods: Targets,
    matcher: Option<Regex>,
}

impl MethodPass {
    pub fn new(rules: &RuleTable) -> Result<Self, RuleError> {
        Ok(Self {
            methods: Targets::new(rules, RuleCategory::MethodName),
            matcher: category_matcher(rules, RuleCategory::MethodName, r":\s*({})\s*\(")?,
        })
    }
}

impl Pass for MethodPass {
    fn id(&self) -> PassId {
        PassId::Methods
    }

    fn apply(&self, code: &str) -> Result<String, SemanticError> {
        let Some(matcher) = &self.matcher else {
            return Ok(code.to_string());
        };
        Ok(rewrite(matcher, code, |caps, _| {
            self.methods
                .get(&caps[1])
                .map(|method| format!(":{method}("))
        }))
    }
}
