//! Pass 1: service resolution.
//!
//! `obtener_servicio("jugadores")` becomes `game:GetService("Players")`. The
//! quoted argument is its own literal segment, so the canonical name is
//! substituted in [`Pass::prepare`] and only when the literal is the sole
//! argument of the accessor call. Any other use of the accessor (a variable
//! argument) only has the accessor itself rewritten.

use regex::Regex;

use super::{Pass, PassId, Targets, compile, is_member_access, rewrite};
use crate::core::error::{RuleError, SemanticError};
use crate::core::literal::{Segment, SegmentKind};
use crate::core::rules::{RuleCategory, RuleTable};

const ACCESSOR: &str = "obtener_servicio";
const QUALIFIED_LOOKUP: &str = "game:GetService";
const METHOD_LOOKUP: &str = "GetService";

#[derive(Debug, Clone)]
pub struct ServicePass {
    /// Vox service name → canonical Roblox name.
    services: Targets,
    accessor: Regex,
    call_open: Regex,
    call_close: Regex,
}

impl ServicePass {
    pub fn new(rules: &RuleTable) -> Result<Self, RuleError> {
        let category = RuleCategory::ServiceName;
        Ok(Self {
            services: Targets::new(rules, category),
            accessor: compile(category, &format!(r"\b{ACCESSOR}\b"))?,
            call_open: compile(category, &format!(r"\b{ACCESSOR}\s*\(\s*$"))?,
            call_close: compile(category, r"^\s*\)")?,
        })
    }
}

impl Pass for ServicePass {
    fn id(&self) -> PassId {
        PassId::Services
    }

    fn prepare(&self, segments: &mut [Segment]) {
        for idx in 1..segments.len().saturating_sub(1) {
            let (before, rest) = segments.split_at_mut(idx);
            let (current, after) = rest.split_at_mut(1);
            let literal = &mut current[0];

            let opens_call = before
                .last()
                .is_some_and(|s| s.kind == SegmentKind::Code && self.call_open.is_match(&s.text));
            let closes_call = after
                .first()
                .is_some_and(|s| s.kind == SegmentKind::Code && self.call_close.is_match(&s.text));
            if !opens_call || !closes_call {
                continue;
            }

            let Some((quote, name)) = literal.literal_body() else {
                continue;
            };
            if let Some(canonical) = self.services.get(name) {
                literal.text = format!("{quote}{canonical}{quote}");
            }
        }
    }

    fn apply(&self, code: &str) -> Result<String, SemanticError> {
        Ok(rewrite(&self.accessor, code, |_, before| {
            let lookup = if is_member_access(before) {
                METHOD_LOOKUP
            } else {
                QUALIFIED_LOOKUP
            };
            Some(lookup.to_string())
        }))
    }
}
