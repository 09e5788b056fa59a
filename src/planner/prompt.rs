//! Prompt templates for itinerary generation.

use super::validator::PlanRequest;
use crate::llm::CompletionRequest;

/// System instruction. `{city}` and `{interests}` are substituted.
const SYSTEM_TEMPLATE: &str = r"You are an expert local travel guide and itinerary planner.
Your goal is to create a perfectly personalized one-day itinerary for {city} based on the user's specific interests: {interests}.

Your response must be strictly formatted as follows:

### 🏙️ Top 5 Recommended Places in {city}
List exactly 5 places that best match the provided interests. For each place, briefly explain *why* it aligns with the user's preference.

### 📅 Day Trip Itinerary
Create a chronological schedule (Morning, Afternoon, Evening) incorporating these places.
- **Morning**: [Activities]
- **Afternoon**: [Activities]
- **Evening**: [Activities]

### 💡 Pro Tips
Include 2-3 practical tips for this specific trip (e.g., best transport, hidden gems, or food recommendations).

Keep the tone enthusiastic, professional, and concise. Use Markdown formatting.";

/// Human instruction. `{city}` and `{interests}` are substituted.
const HUMAN_TEMPLATE: &str = "Create an itinerary for my day trip to {city} involving {interests}";

/// The system and human instructions sent for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    /// Fixed formatting instruction, filled with city and interests.
    pub system: String,
    /// Per-request ask.
    pub human: String,
}

impl From<Prompt> for CompletionRequest {
    fn from(prompt: Prompt) -> Self {
        Self {
            system: prompt.system,
            user: prompt.human,
        }
    }
}

/// Render both instructions for a validated request.
#[must_use]
pub fn compose(request: &PlanRequest) -> Prompt {
    compose_parts(request.city(), &request.interests_joined())
}

/// Render both instructions from a city and an already-joined interest string.
#[must_use]
pub fn compose_parts(city: &str, interests: &str) -> Prompt {
    Prompt {
        system: fill(SYSTEM_TEMPLATE, city, interests),
        human: fill(HUMAN_TEMPLATE, city, interests),
    }
}

fn fill(template: &str, city: &str, interests: &str) -> String {
    // Single pass so braces inside the values are never re-expanded.
    let mut out = String::with_capacity(template.len() + city.len() * 2 + interests.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{city}") {
            out.push_str(city);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{interests}") {
            out.push_str(interests);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
