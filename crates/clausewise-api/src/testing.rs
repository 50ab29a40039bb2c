//! In-memory backend for exercising the pipeline without a network.

use std::sync::Mutex;

use async_trait::async_trait;
use clausewise_ai::{BackendError, CompletionBackend, CompletionRequest};
use clausewise_core::{AnalyzerConfig, Provider};

/// Replies with a fixed outcome and records every call it receives.
pub struct ScriptedBackend {
    reply: Result<String, String>,
    calls: Mutex<Vec<(String, CompletionRequest)>>,
}

impl ScriptedBackend {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            reply: Ok(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with a backend server error carrying `body`.
    pub fn failing(body: impl Into<String>) -> Self {
        Self {
            reply: Err(body.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, CompletionRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> Result<String, BackendError> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.to_string(), request.clone()));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(body) => Err(BackendError::Server {
                status: 503,
                body: body.clone(),
            }),
        }
    }
}

pub fn groq_config() -> AnalyzerConfig {
    AnalyzerConfig::for_provider(Provider::Groq, Some("gsk_test".into()))
}

pub const SAFE_REPLY: &str = r#"{
  "score": 85,
  "scoreLabel": "Safe",
  "summary": "Generally balanced services agreement with one termination concern.",
  "highlights": ["Net 30 payment terms", "Mutual confidentiality"],
  "issues": [
    { "id": 1, "title": "Termination instability", "description": "Either party may terminate without cause on 1-day notice." }
  ],
  "clauses": [
    { "title": "Termination", "text": "Either party may terminate this Agreement without cause upon 1 day's notice." }
  ]
}"#;

pub const TERMINATION_CONTRACT: &str = "\
SERVICES AGREEMENT

1. Services. The Contractor shall provide the software development services described in Schedule A.
2. Payment. The Client shall pay each invoice within 30 days of receipt.
3. Termination. Either party may terminate this Agreement without cause upon 1 day's notice.
4. Confidentiality. Each party shall keep the other's confidential information secret.";
