//! Pass 5: enumerated constants.
//!
//! Three independent rewrites, in order:
//!
//! 1. `familia.Miembro` → `Enum.Family.Member`, only for pairs registered as
//!    `EnumMember` rules. The member is matched case-insensitively, so
//!    `estilo_suavizado.quad` still becomes `Enum.EasingStyle.Quad`; an
//!    unregistered member (`fuente.Size` on a local named `fuente`) is kept.
//! 2. Bare `EnumConstant` names: `neon` → `Enum.Material.Neon`.
//! 3. `rojo_brillante` → `BrickColor.new("Bright rojo")`.

use regex::{Captures, Regex};

use super::{Pass, PassId, Targets, category_matcher, compile, is_member_access, rewrite};
use crate::core::error::{RuleError, SemanticError};
use crate::core::rules::{RuleCategory, RuleTable};

#[derive(Debug, Clone)]
pub struct EnumPass {
    families: Targets,
    /// Keyed by `familia.miembro`.
    members: Targets,
    constants: Targets,
    family_matcher: Option<Regex>,
    constant_matcher: Option<Regex>,
    bright: Regex,
}

impl EnumPass {
    pub fn new(rules: &RuleTable) -> Result<Self, RuleError> {
        Ok(Self {
            families: Targets::new(rules, RuleCategory::EnumFamily),
            members: Targets::new(rules, RuleCategory::EnumMember),
            constants: Targets::new(rules, RuleCategory::EnumConstant),
            family_matcher: category_matcher(
                rules,
                RuleCategory::EnumFamily,
                r"\b({})\.([\p{L}_][\p{L}\p{N}_]*)\b",
            )?,
            constant_matcher: category_matcher(rules, RuleCategory::EnumConstant, r"\b({})\b")?,
            bright: compile(RuleCategory::EnumConstant, r"\b(\w+)_brillante\b")?,
        })
    }

    fn qualify(&self, caps: &Captures<'_>, before: &str) -> Option<String> {
        if is_member_access(before) {
            return None;
        }
        let family = self.families.get(&caps[1])?;
        let member = self.members.get(&format!("{}.{}", &caps[1], &caps[2]))?;
        Some(format!("{family}.{member}"))
    }
}

impl Pass for EnumPass {
    fn id(&self) -> PassId {
        PassId::Enums
    }

    fn apply(&self, code: &str) -> Result<String, SemanticError> {
        let mut code = code.to_string();

        if let Some(matcher) = &self.family_matcher {
            code = rewrite(matcher, &code, |caps, before| self.qualify(caps, before));
        }

        if let Some(matcher) = &self.constant_matcher {
            code = rewrite(matcher, &code, |caps, before| {
                if is_member_access(before) {
                    return None;
                }
                self.constants.get(&caps[1]).map(str::to_string)
            });
        }

        Ok(self
            .bright
            .replace_all(&code, r#"BrickColor.new("Bright $1")"#)
            .into_owned())
    }
}
