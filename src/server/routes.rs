//! HTTP route handlers for the travel planner API.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use crate::planner::{PlannerError, TravelPlanner, error_chain};

use super::state::AppState;

/// Message returned for any failure after validation.
pub const GENERATION_FAILED_DETAIL: &str = "Failed to generate itinerary. Please try again.";

/// Create the API router with all routes; unmatched paths are served from `static_dir`.
pub fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/generate-itinerary", post(generate_itinerary))
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "AI Travel Planner",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Itinerary request. Missing fields deserialize empty and fail validation.
#[derive(Debug, Deserialize)]
pub struct ItineraryRequest {
    /// Destination city.
    #[serde(default)]
    pub city: String,
    /// User interests, in order.
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Itinerary response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ItineraryResponse {
    /// Markdown itinerary from the model.
    pub itinerary: String,
    /// Validated city.
    pub city: String,
    /// Validated interests.
    pub interests: Vec<String>,
}

/// Error body, `{"detail": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason.
    pub detail: String,
}

/// A request failure rendered for HTTP callers as `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    /// Validation or generation failure from the planner.
    Planner(PlannerError),
    /// Body was not JSON or did not match [`ItineraryRequest`].
    Body(JsonRejection),
}

impl From<PlannerError> for ApiError {
    fn from(err: PlannerError) -> Self {
        Self::Planner(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Body(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::Planner(PlannerError::InvalidInput(err)) => {
                warn!(reason = %err, "rejected itinerary request");
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            // Already logged with its cause by the generator.
            Self::Planner(PlannerError::Generation(err)) => {
                debug!(error = %error_chain(&err), "itinerary request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERATION_FAILED_DETAIL.to_string(),
                )
            }
            Self::Body(rejection) => {
                warn!(reason = %rejection.body_text(), "unreadable itinerary request body");
                (rejection.status(), rejection.body_text())
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Handle itinerary generation requests.
async fn generate_itinerary(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ItineraryRequest>, JsonRejection>,
) -> Result<Json<ItineraryResponse>, ApiError> {
    let Json(request) = payload?;
    info!(city = %request.city, interests = ?request.interests, "received itinerary request");

    let mut planner = TravelPlanner::new(&state.generator);
    planner.set_city(&request.city).map_err(PlannerError::from)?;
    planner
        .set_interests(&request.interests)
        .map_err(PlannerError::from)?;

    let city = planner.city().unwrap_or_default().to_string();
    let interests = planner.interests().to_vec();

    let result = planner.generate().await?;

    Ok(Json(ItineraryResponse {
        itinerary: result.itinerary_text,
        city,
        interests,
    }))
}
