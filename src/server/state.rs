//! Application state shared across all request handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::{GroqChat, ModelError, TextGenerator};
use crate::planner::ItineraryGenerator;

/// Shared application state.
///
/// Holds nothing mutable: every request builds its own planner session on top
/// of the shared generator.
pub struct AppState {
    /// Itinerary pipeline bound to the configured model.
    pub generator: ItineraryGenerator,
}

impl AppState {
    /// Create state backed by the Groq chat client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn from_config(config: &AppConfig) -> Result<Arc<Self>, ModelError> {
        let client = GroqChat::new(&config.llm)?;
        Ok(Self::with_model(Arc::new(client)))
    }

    /// Create state around any backend.
    #[must_use]
    pub fn with_model(model: Arc<dyn TextGenerator>) -> Arc<Self> {
        Arc::new(Self {
            generator: ItineraryGenerator::new(model),
        })
    }
}
