//! Per-request planner session.
//!
//! A [`TravelPlanner`] is built for one request, collects city and interests,
//! runs the generator once, and is dropped together with its conversation log.

use tracing::{debug, info, instrument};

use super::errors::{InvalidInputError, PlannerError};
use super::generator::{ItineraryGenerator, PlanResult, PlanStage};
use super::validator::{PlanRequest, split_interests, validate, validate_city, validate_interests};

/// Who produced a conversation entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Speaker {
    /// Input supplied by the caller.
    Human,
    /// Output returned by the model.
    Ai,
}

/// One line of the per-request conversation log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversationEntry {
    /// Origin of the entry.
    pub speaker: Speaker,
    /// Entry text.
    pub content: String,
}

/// Collects one request's input and produces its itinerary.
pub struct TravelPlanner<'a> {
    generator: &'a ItineraryGenerator,
    city: Option<String>,
    interests: Vec<String>,
    log: Vec<ConversationEntry>,
    stage: PlanStage,
    outcome: Option<Result<PlanResult, PlannerError>>,
}

impl<'a> TravelPlanner<'a> {
    /// Start an empty session on a shared generator.
    #[must_use]
    pub fn new(generator: &'a ItineraryGenerator) -> Self {
        debug!(model = %generator.model_id(), "travel planner initialized");
        Self {
            generator,
            city: None,
            interests: Vec::new(),
            log: Vec::new(),
            stage: PlanStage::Idle,
            outcome: None,
        }
    }

    /// Set the destination.
    ///
    /// # Errors
    /// [`InvalidInputError::CityEmpty`] if the city is blank.
    pub fn set_city(&mut self, city: &str) -> Result<(), InvalidInputError> {
        let city = validate_city(city)?;
        info!(city = %city, "city set");
        self.record(Speaker::Human, format!("City: {city}"));
        self.city = Some(city);
        Ok(())
    }

    /// Set interests from a list.
    ///
    /// # Errors
    /// [`InvalidInputError::InterestsEmpty`] if no entry is non-blank.
    pub fn set_interests<S: AsRef<str>>(&mut self, interests: &[S]) -> Result<(), InvalidInputError> {
        let interests = validate_interests(interests)?;
        self.accept_interests(interests);
        Ok(())
    }

    /// Set interests from a comma-separated string.
    ///
    /// # Errors
    /// [`InvalidInputError::InterestsEmpty`] if no segment is non-blank.
    pub fn set_interests_str(&mut self, interests: &str) -> Result<(), InvalidInputError> {
        let interests = split_interests(interests)?;
        self.accept_interests(interests);
        Ok(())
    }

    /// Destination, once set.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// Interests accepted so far.
    #[must_use]
    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    /// Entries recorded so far.
    #[must_use]
    pub fn transcript(&self) -> &[ConversationEntry] {
        &self.log
    }

    /// Current stage.
    #[must_use]
    pub const fn stage(&self) -> PlanStage {
        self.stage
    }

    /// Run the generator once.
    ///
    /// The first call moves the session to `Done` or `Failed`. Later calls return
    /// the same outcome without touching the model again.
    ///
    /// # Errors
    /// [`PlannerError::InvalidInput`] if city or interests were never set,
    /// [`PlannerError::Generation`] if the provider call fails.
    #[instrument(skip(self), fields(city = self.city.as_deref().unwrap_or_default()))]
    pub async fn generate(&mut self) -> Result<PlanResult, PlannerError> {
        if let Some(outcome) = &self.outcome {
            debug!(stage = ?self.stage, "planner session already finished");
            return outcome.clone();
        }

        let outcome = match self.ready_request() {
            Ok(request) => {
                self.stage = PlanStage::Composing;
                debug!(stage = ?self.stage, "input ready");
                self.stage = PlanStage::Calling;
                self.generator
                    .generate_validated(&request)
                    .await
                    .map_err(PlannerError::from)
            }
            Err(err) => Err(err.into()),
        };

        match &outcome {
            Ok(result) => {
                self.stage = PlanStage::Done;
                self.record(Speaker::Ai, result.itinerary_text.clone());
            }
            Err(_) => self.stage = PlanStage::Failed,
        }
        debug!(stage = ?self.stage, transcript = ?self.log, "planner session finished");

        self.outcome = Some(outcome.clone());
        outcome
    }

    fn ready_request(&self) -> Result<PlanRequest, InvalidInputError> {
        let city = self.city.as_deref().ok_or(InvalidInputError::CityEmpty)?;
        validate(city, self.interests.as_slice())
    }

    fn accept_interests(&mut self, interests: Vec<String>) {
        let joined = interests.join(", ");
        info!(interests = ?interests, "interests set");
        self.record(Speaker::Human, format!("Interests: {joined}"));
        self.interests = interests;
    }

    fn record(&mut self, speaker: Speaker, content: String) {
        self.log.push(ConversationEntry { speaker, content });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionRequest, ModelError, TextGenerator};
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Echo {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TextGenerator for Echo {
        fn model_id(&self) -> &str {
            "echo"
        }

        async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ModelError::Unauthorized(401))
            } else {
                Ok(format!("itinerary: {}", request.user))
            }
        }
    }

    fn generator(fail: bool) -> (Arc<Echo>, ItineraryGenerator) {
        let model = Arc::new(Echo {
            calls: AtomicUsize::new(0),
            fail,
        });
        let generator = ItineraryGenerator::new(model.clone());
        (model, generator)
    }

    #[test]
    fn test_setters_record_conversation() {
        let (_, generator) = generator(false);
        let mut planner = TravelPlanner::new(&generator);
        assert_eq!(planner.stage(), PlanStage::Idle);

        planner.set_city("  Paris ").unwrap();
        planner.set_interests_str("art,  food, ").unwrap();

        assert_eq!(planner.city(), Some("Paris"));
        assert_eq!(planner.interests(), ["art", "food"]);
        assert_eq!(
            planner.transcript(),
            [
                ConversationEntry {
                    speaker: Speaker::Human,
                    content: "City: Paris".to_string(),
                },
                ConversationEntry {
                    speaker: Speaker::Human,
                    content: "Interests: art, food".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_invalid_setters_leave_state_untouched() {
        let (_, generator) = generator(false);
        let mut planner = TravelPlanner::new(&generator);

        assert_eq!(planner.set_city("   "), Err(InvalidInputError::CityEmpty));
        assert_eq!(planner.set_interests_str(" , "), Err(InvalidInputError::InterestsEmpty));
        let none: [&str; 0] = [];
        assert_eq!(planner.set_interests(&none), Err(InvalidInputError::InterestsEmpty));

        assert_eq!(planner.city(), None);
        assert!(planner.interests().is_empty());
        assert!(planner.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_generate_records_ai_entry_and_finishes() {
        let (model, generator) = generator(false);
        let mut planner = TravelPlanner::new(&generator);
        planner.set_city("Paris").unwrap();
        planner.set_interests(&["art", "food"]).unwrap();

        let result = planner.generate().await.unwrap();
        let expected = "itinerary: Create an itinerary for my day trip to Paris involving art, food";
        assert_eq!(result.itinerary_text, expected);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);

        assert_eq!(planner.stage(), PlanStage::Done);
        assert_eq!(planner.transcript().len(), 3);
        assert_eq!(
            planner.transcript().last(),
            Some(&ConversationEntry {
                speaker: Speaker::Ai,
                content: expected.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_finished_session_does_not_call_again() {
        let (model, generator) = generator(false);
        let mut planner = TravelPlanner::new(&generator);
        planner.set_city("Paris").unwrap();
        planner.set_interests(&["art"]).unwrap();

        let first = planner.generate().await.unwrap();
        let second = planner.generate().await.unwrap();
        assert_eq!(first, second);
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
        assert_eq!(planner.transcript().len(), 3);
    }

    #[tokio::test]
    async fn test_generate_without_input_is_rejected() {
        let (model, generator) = generator(false);

        let mut planner = TravelPlanner::new(&generator);
        let err = planner.generate().await.unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(InvalidInputError::CityEmpty)));
        assert_eq!(planner.stage(), PlanStage::Failed);

        let mut planner = TravelPlanner::new(&generator);
        planner.set_city("Oslo").unwrap();
        let err = planner.generate().await.unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(InvalidInputError::InterestsEmpty)));
        assert_eq!(planner.stage(), PlanStage::Failed);

        assert_eq!(model.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_terminal() {
        let (model, generator) = generator(true);
        let mut planner = TravelPlanner::new(&generator);
        planner.set_city("Paris").unwrap();
        planner.set_interests(&["art"]).unwrap();

        let err = planner.generate().await.unwrap_err();
        assert!(matches!(err, PlannerError::Generation(_)));
        assert_eq!(err.to_string(), "failed to generate itinerary");
        assert_eq!(planner.stage(), PlanStage::Failed);
        assert!(planner.transcript().iter().all(|entry| entry.speaker == Speaker::Human));

        let again = planner.generate().await.unwrap_err();
        assert!(matches!(again, PlannerError::Generation(_)));
        assert_eq!(model.calls.load(Ordering::SeqCst), 1);
    }
}
