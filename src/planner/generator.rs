//! Itinerary generation: validate, compose, call the model.

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use super::errors::{GenerationError, PlannerError, error_chain};
use super::prompt::compose;
use super::validator::{PlanRequest, validate};
use crate::llm::{CompletionRequest, TextGenerator};

/// Where a single plan run currently is. `Done` and `Failed` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanStage {
    /// Nothing started.
    Idle,
    /// Input accepted, building the prompt.
    Composing,
    /// Waiting on the provider.
    Calling,
    /// Completion returned.
    Done,
    /// Validation or generation failed.
    Failed,
}

impl PlanStage {
    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// The model's itinerary, returned verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanResult {
    /// Markdown blob produced by the model; never parsed.
    pub itinerary_text: String,
}

/// Stateless pipeline bound to one model backend; shared across requests.
#[derive(Clone)]
pub struct ItineraryGenerator {
    model: Arc<dyn TextGenerator>,
}

impl ItineraryGenerator {
    /// Bind the pipeline to a backend.
    #[must_use]
    pub const fn new(model: Arc<dyn TextGenerator>) -> Self {
        Self { model }
    }

    /// Model identifier of the bound backend.
    #[must_use]
    pub fn model_id(&self) -> &str {
        self.model.model_id()
    }

    /// Validate, compose and generate in one call.
    ///
    /// Input is checked before anything is sent, so invalid requests never reach
    /// the network.
    ///
    /// # Errors
    /// [`PlannerError::InvalidInput`] for bad input, [`PlannerError::Generation`]
    /// for any provider failure.
    #[instrument(skip(self, interests), fields(model = %self.model.model_id()))]
    pub async fn generate<S: AsRef<str> + Sync>(
        &self,
        city: &str,
        interests: &[S],
    ) -> Result<String, PlannerError> {
        let request = validate(city, interests)?;
        let result = self.generate_validated(&request).await?;
        Ok(result.itinerary_text)
    }

    /// Generate for an already validated request.
    ///
    /// # Errors
    /// [`GenerationError`] wrapping the provider failure. No partial text is
    /// ever returned.
    pub async fn generate_validated(&self, request: &PlanRequest) -> Result<PlanResult, GenerationError> {
        debug!(stage = ?PlanStage::Composing, "plan stage");
        let completion_request = CompletionRequest::from(compose(request));

        debug!(stage = ?PlanStage::Calling, "plan stage");
        match self.model.complete(&completion_request).await {
            Ok(itinerary_text) => {
                debug!(stage = ?PlanStage::Done, "plan stage");
                info!(city = %request.city(), "itinerary generated");
                Ok(PlanResult { itinerary_text })
            }
            Err(cause) => {
                let err = GenerationError::new(cause);
                debug!(stage = ?PlanStage::Failed, "plan stage");
                error!(city = %request.city(), error = %error_chain(&err), "itinerary generation failed");
                Err(err)
            }
        }
    }
}

/// Generate an itinerary for `city` and `interests` with the given backend.
///
/// # Errors
/// See [`ItineraryGenerator::generate`].
pub async fn generate_itinerary<S: AsRef<str> + Sync>(
    model: Arc<dyn TextGenerator>,
    city: &str,
    interests: &[S],
) -> Result<String, PlannerError> {
    ItineraryGenerator::new(model).generate(city, interests).await
}
