//! Pass 6: keywords and global functions.
//!
//! Runs last because it is the least specific: a bare word-bounded token.
//! Tokens used as member names (`obj.fin`, `obj:tipo`) are left alone.

use regex::Regex;

use super::{Pass, PassId, Targets, category_matcher, compile, is_member_access, rewrite};
use crate::core::error::{RuleError, SemanticError};
use crate::core::rules::{RuleCategory, RuleTable};

/// Target of the two-word `sino si`. Not a keyword rule, so the identifier
/// `sino_si` is never rewritten.
const ELSE_IF_TARGET: &str = "elseif";

#[derive(Debug, Clone)]
pub struct KeywordPass {
    keywords: Targets,
    globals: Targets,
    else_if: Regex,
    global_matcher: Option<Regex>,
    keyword_matcher: Option<Regex>,
}

impl KeywordPass {
    pub fn new(rules: &RuleTable) -> Result<Self, RuleError> {
        Ok(Self {
            keywords: Targets::new(rules, RuleCategory::Keyword),
            globals: Targets::new(rules, RuleCategory::GlobalFunction),
            else_if: compile(RuleCategory::Keyword, r"\bsino\s+si\b")?,
            global_matcher: category_matcher(rules, RuleCategory::GlobalFunction, r"\b({})\b(\s*\()")?,
            keyword_matcher: category_matcher(rules, RuleCategory::Keyword, r"\b({})\b")?,
        })
    }
}

impl Pass for KeywordPass {
    fn id(&self) -> PassId {
        PassId::Keywords
    }

    fn apply(&self, code: &str) -> Result<String, SemanticError> {
        let mut code = self.else_if.replace_all(code, ELSE_IF_TARGET).into_owned();

        if let Some(matcher) = &self.global_matcher {
            code = rewrite(matcher, &code, |caps, before| {
                if is_member_access(before) {
                    return None;
                }
                self.globals
                    .get(&caps[1])
                    .map(|function| format!("{function}{}", &caps[2]))
            });
        }

        if let Some(matcher) = &self.keyword_matcher {
            code = rewrite(matcher, &code, |caps, before| {
                if is_member_access(before) {
                    return None;
                }
                self.keywords.get(&caps[1]).map(str::to_string)
            });
        }

        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::rules::{TranslationRule, default_rules};

    fn translate(code: &str) -> String {
        KeywordPass::new(&default_rules())
            .unwrap()
            .apply(code)
            .unwrap()
    }

    #[test]
    fn test_structural_keywords() {
        assert_eq!(translate("si x > 5 entonces "), "if x > 5 then ");
        assert_eq!(translate(") fin"), ") end");
        assert_eq!(
            translate("mientras verdadero hacer esperar(1) fin"),
            "while true do wait(1) end"
        );
        assert_eq!(
            translate("para i, v en ipares(t) hacer"),
            "for i, v in ipairs(t) do"
        );
    }

    #[test]
    fn test_else_if() {
        assert_eq!(translate("sino si x < 0 entonces"), "elseif x < 0 then");
        assert_eq!(translate("sino  si listo"), "elseif listo");
        assert_eq!(translate("sino"), "else");
    }

    #[test]
    fn test_global_functions_need_call_syntax() {
        assert_eq!(translate("tarea_espera(2)"), "task.wait(2)");
        assert_eq!(translate("tarea_spawn (f)"), "task.spawn (f)");
        assert_eq!(translate("local tarea_espera = 1"), "local tarea_espera = 1");
        assert_eq!(translate("info_tween(1)"), "TweenInfo.new(1)");
    }

    #[test]
    fn test_data_store_helpers_expand_inline() {
        assert_eq!(
            translate("cargar_datos(tienda, clave)"),
            "function(store, key) return store:GetAsync(key) end(tienda, clave)"
        );
    }

    #[test]
    fn test_member_names_are_not_keywords() {
        assert_eq!(translate("obj.fin = nulo"), "obj.fin = nil");
        assert_eq!(translate("x = obj:tipo()"), "x = obj:tipo()");
        assert_eq!(translate("t.insertar(x)"), "t.insertar(x)");
    }

    #[test]
    fn test_concatenation_does_not_hide_keyword() {
        assert_eq!(translate("s = a..nulo"), "s = a..nil");
    }

    #[test]
    fn test_identifiers_containing_keywords_untouched() {
        assert_eq!(translate("local final = sinopsis"), "local final = sinopsis");
    }

    #[test]
    fn test_target_code_is_stable() {
        let code = "if x then print(x) elseif y2 then return nil end";
        assert_eq!(translate(code), code);
    }

    #[test]
    fn test_sino_si_identifier_untouched() {
        assert_eq!(translate("x = sino_si"), "x = sino_si");
        assert_eq!(translate("sino_si(1)"), "sino_si(1)");
    }

    #[test]
    fn test_else_if_without_keyword_rules() {
        let mut rules = RuleTable::new();
        rules
            .insert(TranslationRule::new(RuleCategory::Keyword, "fin", "end"))
            .unwrap();
        let pass = KeywordPass::new(&rules).unwrap();

        assert_eq!(pass.apply("sino si x fin").unwrap(), "elseif x end");
    }
}
