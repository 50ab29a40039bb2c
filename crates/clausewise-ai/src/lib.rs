//! Completion backends: the seam between the analyzer and a hosted LLM.

mod backend;
mod chat;

pub use backend::{BackendError, CompletionBackend, CompletionRequest};
pub use chat::ChatClient;
