use async_trait::async_trait;
use clausewise_core::AnalyzerConfig;
use clausewise_core::prompt::{build_user_prompt, system_prompt};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Server { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("backend reply contained no message content")]
    EmptyReply,
}

/// A single system + user prompt exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Ask the backend to constrain its output to a JSON object.
    pub json_mode: bool,
}

impl CompletionRequest {
    /// The contract-scoring prompt for `contract_text`, with sampling settings
    /// taken from `config`.
    pub fn contract_analysis(contract_text: &str, config: &AnalyzerConfig) -> Self {
        Self {
            system_prompt: system_prompt().to_string(),
            user_prompt: build_user_prompt(contract_text),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            json_mode: config.json_mode,
        }
    }
}

/// Sends a prompt to a hosted model and returns the reply text.
///
/// The credential is passed per call so that it is always read from the
/// caller's configuration at request time.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, BackendError>;
}
