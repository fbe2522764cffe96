use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{RuleCategory, RuleTable, TranslationRule, default_rules};

pub const CONFIG_FILE_NAME: &str = ".voxrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_output_extension")]
    pub output_extension: String,
    /// Added to the built-in deny-list; entries can never be removed.
    #[serde(default)]
    pub forbidden_words: Vec<String>,
    #[serde(default)]
    pub rules: RuleOverrides,
}

/// Per-category `token → target` maps merged over the built-in rules.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleOverrides {
    #[serde(default)]
    pub keywords: BTreeMap<String, String>,
    #[serde(default)]
    pub global_functions: BTreeMap<String, String>,
    #[serde(default)]
    pub methods: BTreeMap<String, String>,
    #[serde(default)]
    pub constructors: BTreeMap<String, ConstructorOverride>,
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    #[serde(default)]
    pub math_functions: BTreeMap<String, String>,
    #[serde(default)]
    pub services: BTreeMap<String, String>,
    #[serde(default)]
    pub enum_families: BTreeMap<String, String>,
    #[serde(default)]
    pub enum_members: BTreeMap<String, String>,
    #[serde(default)]
    pub enum_constants: BTreeMap<String, String>,
}

/// A constructor override is either the target type name or a
/// `{ "target": ..., "maxArity": ... }` object.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConstructorOverride {
    Target(String),
    #[serde(rename_all = "camelCase")]
    Bounded {
        target: String,
        max_arity: Option<usize>,
    },
}

impl ConstructorOverride {
    fn into_rule(self, source: String) -> TranslationRule {
        match self {
            ConstructorOverride::Target(target) => {
                TranslationRule::new(RuleCategory::ConstructorName, source, target)
            }
            ConstructorOverride::Bounded { target, max_arity } => {
                let rule = TranslationRule::new(RuleCategory::ConstructorName, source, target);
                match max_arity {
                    Some(max) => rule.with_max_arity(max),
                    None => rule,
                }
            }
        }
    }
}

fn default_includes() -> Vec<String> {
    vec!["**/*.vox".to_string()]
}

fn default_output_extension() -> String {
    "lua".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: Vec::new(),
            output_extension: default_output_extension(),
            forbidden_words: Vec::new(),
            rules: RuleOverrides::default(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or `includes` is
    /// invalid or the output extension is empty.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.includes {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'includes': \"{}\"", pattern))?;
        }

        let extension = self.output_extension.trim_start_matches('.');
        if extension.is_empty() {
            anyhow::bail!("'outputExtension' must not be empty");
        }

        Ok(())
    }

    /// Output extension without a leading dot.
    pub fn output_extension(&self) -> &str {
        self.output_extension.trim_start_matches('.')
    }

    /// The built-in rules with this configuration's overrides merged in.
    pub fn build_rule_table(&self) -> Result<RuleTable> {
        let mut table = default_rules();
        let rules = &self.rules;

        let simple = [
            (RuleCategory::Keyword, &rules.keywords),
            (RuleCategory::GlobalFunction, &rules.global_functions),
            (RuleCategory::MethodName, &rules.methods),
            (RuleCategory::PropertyName, &rules.properties),
            (RuleCategory::MathFunction, &rules.math_functions),
            (RuleCategory::ServiceName, &rules.services),
            (RuleCategory::EnumFamily, &rules.enum_families),
            (RuleCategory::EnumMember, &rules.enum_members),
            (RuleCategory::EnumConstant, &rules.enum_constants),
        ];
        for (category, overrides) in simple {
            for (source, target) in overrides {
                table
                    .upsert(TranslationRule::new(category, source.as_str(), target.as_str()))
                    .with_context(|| format!("Invalid rule override in config: \"{}\"", source))?;
            }
        }

        for (source, constructor) in &rules.constructors {
            table
                .upsert(constructor.clone().into_rule(source.clone()))
                .with_context(|| format!("Invalid rule override in config: \"{}\"", source))?;
        }

        Ok(table)
    }

    /// Compiled include and ignore patterns.
    pub fn patterns(&self) -> Result<(Vec<Pattern>, Vec<Pattern>)> {
        let compile = |patterns: &[String]| -> Result<Vec<Pattern>> {
            patterns
                .iter()
                .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern: \"{}\"", p)))
                .collect()
        };
        Ok((compile(&self.includes)?, compile(&self.ignores)?))
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Path of the file the config was read from, `None` when using defaults.
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            path: None,
        }),
    }
}
