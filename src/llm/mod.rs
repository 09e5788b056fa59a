//! Remote text-generation client.
//!
//! The planner only depends on [`TextGenerator`]; [`GroqChat`] is the production
//! backend speaking the OpenAI-compatible chat completions API.

pub mod error;
pub mod groq_chat;

pub use error::ModelError;
pub use groq_chat::GroqChat;

use async_trait::async_trait;

/// A single-shot completion request: one system and one user message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    /// System instruction.
    pub system: String,
    /// User (human) instruction.
    pub user: String,
}

/// A backend that turns a prompt into plain completion text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Identifier of the model this backend is bound to.
    fn model_id(&self) -> &str;

    /// Send one request and return the completion text verbatim.
    ///
    /// # Errors
    /// Returns an error on any transport, authentication or provider failure.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError>;
}
