//! Analyzer configuration.
//!
//! Populated once at start-up (see the `clausewise` binary) and handed to the
//! analyzer explicitly. The credential may be absent; that is reported per
//! request rather than at start-up.

use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

/// OpenAI-compatible completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAi,
    Groq,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Groq => "groq",
        }
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            Self::OpenAi => "OPENAI_API_KEY",
            Self::Groq => "GROQ_API_KEY",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com/v1",
            Self::Groq => "https://api.groq.com/openai/v1",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Groq => "mixtral-8x7b-32768",
        }
    }

    /// Whether `response_format: json_object` is requested unless overridden.
    pub fn default_json_mode(&self) -> bool {
        match self {
            Self::OpenAi => true,
            Self::Groq => false,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "groq" => Ok(Self::Groq),
            other => Err(format!("unknown provider '{other}' (expected openai or groq)")),
        }
    }
}

/// How far the model's self-reported score is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScorePolicy {
    /// Keep the model's (clamped) score and its label.
    #[default]
    Trust,
    /// Keep the (clamped) score, recompute the label from the score bands.
    Enforce,
}

impl fmt::Display for ScorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Trust => "trust",
            Self::Enforce => "enforce",
        })
    }
}

impl FromStr for ScorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trust" => Ok(Self::Trust),
            "enforce" => Ok(Self::Enforce),
            other => Err(format!("unknown score policy '{other}' (expected trust or enforce)")),
        }
    }
}

/// Everything the analyzer needs to talk to a backend.
#[derive(Clone)]
pub struct AnalyzerConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub json_mode: bool,
    pub score_policy: ScorePolicy,
}

impl AnalyzerConfig {
    /// Provider defaults with the given credential.
    pub fn for_provider(provider: Provider, api_key: Option<String>) -> Self {
        Self {
            provider,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: provider.default_model().to_string(),
            base_url: provider.default_base_url().to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            json_mode: provider.default_json_mode(),
            score_policy: ScorePolicy::default(),
        }
    }

    /// The configured credential, if it is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }
}

// Keep the key out of logs.
impl fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("json_mode", &self.json_mode)
            .field("score_policy", &self.score_policy)
            .finish()
    }
}
