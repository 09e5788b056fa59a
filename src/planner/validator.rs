//! Input validation for itinerary requests.

use tracing::info;

use super::errors::InvalidInputError;

/// A validated request: trimmed city and at least one trimmed interest.
///
/// Only constructible through [`validate`] and friends, so holding one proves
/// both fields were checked. Duplicate interests are kept as given.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanRequest {
    city: String,
    interests: Vec<String>,
}

impl PlanRequest {
    /// Trimmed city name.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Trimmed interests, in caller order.
    #[must_use]
    pub fn interests(&self) -> &[String] {
        &self.interests
    }

    /// Interests joined with `", "`.
    #[must_use]
    pub fn interests_joined(&self) -> String {
        self.interests.join(", ")
    }
}

/// Validate a city and an interest list.
///
/// Blank entries in `interests` are dropped; order of the rest is preserved.
///
/// # Errors
/// [`InvalidInputError::CityEmpty`] if the city is blank, otherwise
/// [`InvalidInputError::InterestsEmpty`] if no interest survives trimming.
pub fn validate<S: AsRef<str>>(city: &str, interests: &[S]) -> Result<PlanRequest, InvalidInputError> {
    let city = validate_city(city)?;
    let interests = validate_interests(interests)?;
    info!(city = %city, interests = ?interests, "accepted itinerary input");
    Ok(PlanRequest { city, interests })
}

/// Validate a city and a comma-separated interest string such as `"art, food"`.
///
/// # Errors
/// Same as [`validate`]; a string of only commas and blanks is `InterestsEmpty`.
pub fn validate_str(city: &str, interests: &str) -> Result<PlanRequest, InvalidInputError> {
    let city = validate_city(city)?;
    let interests = split_interests(interests)?;
    info!(city = %city, interests = ?interests, "accepted itinerary input");
    Ok(PlanRequest { city, interests })
}

/// Trim a city name, rejecting blanks.
///
/// # Errors
/// [`InvalidInputError::CityEmpty`] if nothing remains after trimming.
pub fn validate_city(city: &str) -> Result<String, InvalidInputError> {
    let trimmed = city.trim();
    if trimmed.is_empty() {
        return Err(InvalidInputError::CityEmpty);
    }
    Ok(trimmed.to_string())
}

/// Trim every interest, drop blanks, and require at least one.
///
/// # Errors
/// [`InvalidInputError::InterestsEmpty`] if nothing remains.
pub fn validate_interests<S: AsRef<str>>(interests: &[S]) -> Result<Vec<String>, InvalidInputError> {
    let cleaned: Vec<String> = interests
        .iter()
        .map(|interest| interest.as_ref().trim())
        .filter(|interest| !interest.is_empty())
        .map(str::to_string)
        .collect();

    if cleaned.is_empty() {
        return Err(InvalidInputError::InterestsEmpty);
    }
    Ok(cleaned)
}

/// Split a comma-separated interest string into trimmed, non-blank segments.
///
/// # Errors
/// [`InvalidInputError::InterestsEmpty`] if no segment is non-blank.
pub fn split_interests(interests: &str) -> Result<Vec<String>, InvalidInputError> {
    let segments: Vec<&str> = interests.split(',').collect();
    validate_interests(&segments)
}
