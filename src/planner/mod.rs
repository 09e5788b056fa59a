//! Itinerary planning pipeline.
//!
//! Control flow is linear: [`validator`] → [`prompt`] → [`generator`], with
//! [`session`] wrapping one run per request and [`errors`] carrying the
//! two-kind failure taxonomy.

pub mod errors;
pub mod generator;
pub mod prompt;
pub mod session;
pub mod validator;

pub use errors::{GenerationError, InvalidInputError, PlannerError, error_chain};
pub use generator::{ItineraryGenerator, PlanResult, PlanStage, generate_itinerary};
pub use prompt::{Prompt, compose, compose_parts};
pub use session::{ConversationEntry, Speaker, TravelPlanner};
pub use validator::{PlanRequest, validate, validate_str};
