//! Backend settings shared by every subcommand.

use clap::Args;
use clausewise_core::{AnalyzerConfig, Provider, ScorePolicy};

#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// Completion provider: openai or groq
    #[arg(long, env = "CLAUSEWISE_PROVIDER", default_value = "groq")]
    pub provider: Provider,

    /// API key; falls back to OPENAI_API_KEY or GROQ_API_KEY for the chosen provider
    #[arg(long, env = "CLAUSEWISE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name (default depends on provider)
    #[arg(long, env = "CLAUSEWISE_MODEL")]
    pub model: Option<String>,

    /// API base URL (default depends on provider)
    #[arg(long, env = "CLAUSEWISE_BASE_URL")]
    pub base_url: Option<String>,

    /// Sampling temperature
    #[arg(long, env = "CLAUSEWISE_TEMPERATURE", default_value_t = clausewise_core::config::DEFAULT_TEMPERATURE)]
    pub temperature: f32,

    /// Completion length limit in tokens
    #[arg(long, env = "CLAUSEWISE_MAX_TOKENS", default_value_t = clausewise_core::config::DEFAULT_MAX_TOKENS)]
    pub max_tokens: u32,

    /// Request JSON output mode from the provider (default depends on provider)
    #[arg(long, env = "CLAUSEWISE_JSON_MODE")]
    pub json_mode: Option<bool>,

    /// trust: keep the model's label; enforce: derive the label from the score
    #[arg(long, env = "CLAUSEWISE_SCORE_POLICY", default_value = "trust")]
    pub score_policy: ScorePolicy,
}

impl BackendArgs {
    /// Resolve into an [`AnalyzerConfig`], looking up the provider's key
    /// variable through `lookup` when no key was given directly.
    pub fn resolve<F>(self, lookup: F) -> AnalyzerConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup(self.provider.api_key_var()));

        let mut config = AnalyzerConfig::for_provider(self.provider, api_key);
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(json_mode) = self.json_mode {
            config.json_mode = json_mode;
        }
        config.temperature = self.temperature;
        config.max_tokens = self.max_tokens;
        config.score_policy = self.score_policy;
        config
    }

    pub fn resolve_from_env(self) -> AnalyzerConfig {
        self.resolve(|var| std::env::var(var).ok())
    }
}
