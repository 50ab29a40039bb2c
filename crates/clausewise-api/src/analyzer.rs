use std::sync::Arc;

use clausewise_ai::{ChatClient, CompletionBackend, CompletionRequest};
use clausewise_core::{
    AnalysisRequest, AnalysisResult, AnalyzerConfig, normalize_reply, parse_reply,
};
use tracing::{error, info, warn};

use crate::error::AnalysisError;

/// Characters of a malformed reply kept in the log line.
const REPLY_PREVIEW_CHARS: usize = 200;

/// Runs one contract through the configured backend.
///
/// Holds no per-request state; share it behind an [`Arc`].
pub struct Analyzer {
    config: AnalyzerConfig,
    backend: Arc<dyn CompletionBackend>,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig, backend: Arc<dyn CompletionBackend>) -> Self {
        Self { config, backend }
    }

    /// An analyzer talking to the configured provider over HTTP.
    pub fn with_chat_client(config: AnalyzerConfig) -> Self {
        let backend = Arc::new(ChatClient::from_config(&config));
        Self::new(config, backend)
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Validate, prompt, call, parse, normalise.
    ///
    /// The backend is only contacted once the text and the credential have
    /// both been checked.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResult, AnalysisError> {
        if !request.is_valid() {
            return Err(AnalysisError::InvalidInput);
        }

        let Some(api_key) = self.config.api_key() else {
            let var = self.config.provider.api_key_var();
            warn!(provider = %self.config.provider, var, "credential not configured");
            return Err(AnalysisError::MissingCredential { var });
        };

        let completion = CompletionRequest::contract_analysis(&request.contract_text, &self.config);
        let raw = self
            .backend
            .complete(api_key, &completion)
            .await
            .inspect_err(|e| {
                error!(
                    provider = %self.config.provider,
                    model = %self.config.model,
                    error = %e,
                    "backend call failed"
                )
            })?;

        let reply = parse_reply(&raw).inspect_err(|e| {
            let preview: String = raw.chars().take(REPLY_PREVIEW_CHARS).collect();
            error!(error = %e, raw = %preview, "model reply is not JSON");
        })?;
        let result = normalize_reply(&reply, self.config.score_policy)
            .inspect_err(|e| error!(error = %e, "model reply has the wrong shape"))?;

        info!(
            score = result.score,
            label = %result.score_label,
            issues = result.issues.len(),
            clauses = result.clauses.len(),
            "analysis complete"
        );
        Ok(result)
    }
}
