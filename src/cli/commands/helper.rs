use anyhow::{Context, Result};

use crate::config::{Config, load_config};
use crate::core::Translator;

/// Configuration and translator for one command invocation.
pub struct TranslateContext {
    pub config: Config,
    pub translator: Translator,
}

impl TranslateContext {
    /// Load `.voxrc.json` (or defaults) from the working directory and build
    /// the translator it describes.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let loaded = load_config(&cwd)?;
        let origin = match &loaded.path {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".to_string(),
        };
        tracing::debug!(config = %origin, "using configuration");

        let config = loaded.config;
        let rules = config
            .build_rule_table()
            .with_context(|| format!("Failed to build rules from {}", origin))?;
        let translator = Translator::with_forbidden_words(rules, &config.forbidden_words)
            .context("Failed to build translator")?;
        Ok(Self { config, translator })
    }
}
