//! Pass 4: property access and `math` members.

use regex::Regex;

use super::{Pass, PassId, Targets, category_matcher, rewrite};
use crate::core::error::{RuleError, SemanticError};
use crate::core::rules::{RuleCategory, RuleTable};

#[derive(Debug, Clone)]
pub struct PropertyPass {
    properties: Targets,
    math: Targets,
    property_matcher: Option<Regex>,
    math_matcher: Option<Regex>,
}

impl PropertyPass {
    pub fn new(rules: &RuleTable) -> Result<Self, RuleError> {
        Ok(Self {
            properties: Targets::new(rules, RuleCategory::PropertyName),
            math: Targets::new(rules, RuleCategory::MathFunction),
            property_matcher: category_matcher(rules, RuleCategory::PropertyName, r"\.({})\b")?,
            math_matcher: category_matcher(rules, RuleCategory::MathFunction, r"\bmath\.({})\b")?,
        })
    }
}

impl Pass for PropertyPass {
    fn id(&self) -> PassId {
        PassId::Properties
    }

    fn apply(&self, code: &str) -> Result<String, SemanticError> {
        let mut code = code.to_string();

        if let Some(matcher) = &self.property_matcher {
            code = rewrite(matcher, &code, |caps, before| {
                // `"a"..texto` is concatenation, not member access.
                if before.ends_with('.') {
                    return None;
                }
                self.properties
                    .get(&caps[1])
                    .map(|property| format!(".{property}"))
            });
        }

        if let Some(matcher) = &self.math_matcher {
            code = rewrite(matcher, &code, |caps, _| {
                self.math.get(&caps[1]).map(|function| format!("math.{function}"))
            });
        }

        Ok(code)
    }
}
