//! Error types for the planner.

use std::error::Error as StdError;
use std::sync::Arc;

use thiserror::Error;

use crate::llm::ModelError;

/// Caller-supplied data violates a precondition.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum InvalidInputError {
    /// City missing, empty or whitespace only.
    #[error("city empty")]
    CityEmpty,
    /// No non-blank interest was supplied.
    #[error("interests empty")]
    InterestsEmpty,
}

/// Anything that went wrong after validation.
///
/// The display message is fixed; the provider failure is only reachable through
/// [`std::error::Error::source`] so it can be logged without reaching the caller.
/// Cloning shares the same cause.
#[derive(Clone, Debug, Error)]
#[error("failed to generate itinerary")]
pub struct GenerationError {
    #[source]
    cause: Arc<ModelError>,
}

impl GenerationError {
    /// Wrap a provider failure.
    #[must_use]
    pub fn new(cause: ModelError) -> Self {
        Self {
            cause: Arc::new(cause),
        }
    }

    /// The underlying provider failure.
    #[must_use]
    pub fn cause(&self) -> &ModelError {
        &self.cause
    }
}

impl From<ModelError> for GenerationError {
    fn from(cause: ModelError) -> Self {
        Self::new(cause)
    }
}

/// Boundary error of the itinerary pipeline.
#[derive(Clone, Debug, Error)]
pub enum PlannerError {
    /// Rejected before any network call.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
    /// Failed after validation.
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

/// Render an error and every `source()` below it as `outer: inner: ...`.
#[must_use]
pub fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        out.push_str(": ");
        out.push_str(&source.to_string());
        current = source.source();
    }
    out
}
