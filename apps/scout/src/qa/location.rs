//! Location inference: ask the model for the nearest known city, then resolve its
//! free-text answer against the city list with fuzzy matching.

use serde::Serialize;

use crate::llm_client::prompts::fill;
use crate::llm_client::{ChatModel, LlmError};
use crate::qa::fuzzy::best_match;
use crate::qa::prompts::{LOCATION_PROMPT, LOCATION_SYSTEM};

/// Minimum similarity (0–100) for a reply to count as one of the known cities.
pub const MATCH_THRESHOLD: u8 = 80;
pub const REMOTE_CITY: &str = "Remote";
pub const OTHER_CITY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "city", rename_all = "snake_case")]
pub enum LocationMatch {
    Remote,
    City(String),
    Other,
}

impl LocationMatch {
    /// The `city` value of the location row this match resolves to.
    pub fn city(&self) -> &str {
        match self {
            LocationMatch::Remote => REMOTE_CITY,
            LocationMatch::City(city) => city,
            LocationMatch::Other => OTHER_CITY,
        }
    }
}

pub async fn extract_location_with_llm<S: AsRef<str>>(
    llm: &dyn ChatModel,
    text: &str,
    cities: &[S],
) -> Result<String, LlmError> {
    let city_list = cities
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<_>>()
        .join(", ");
    let prompt = fill(LOCATION_PROMPT, &[("cities", city_list.as_str()), ("text", text)]);
    let reply = llm.complete(&prompt, LOCATION_SYSTEM).await?;
    Ok(reply.trim().to_string())
}

/// `remote` in any case short-circuits to Remote; otherwise the best city at or
/// above `MATCH_THRESHOLD`, else Other.
pub fn match_location<S: AsRef<str>>(location: &str, cities: &[S]) -> LocationMatch {
    let location = location.trim();
    if location.eq_ignore_ascii_case("remote") {
        return LocationMatch::Remote;
    }

    match best_match(location, cities) {
        Some((city, score)) if score >= MATCH_THRESHOLD => LocationMatch::City(city.to_string()),
        _ => LocationMatch::Other,
    }
}
