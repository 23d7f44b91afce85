//! Résumé structuring: turns raw résumé text into a `ParsedResume` via the LLM.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::llm_client::prompts::{fill, JSON_ONLY_SYSTEM};
use crate::llm_client::{complete_json, ChatModel, LlmError};
use crate::resume::prompts::{RESUME_PARSE_PROMPT, RESUME_PARSE_SYSTEM};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub name: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub organizations: Vec<String>,
}

impl ParsedResume {
    /// Human-readable three-line summary shown on the upload page.
    pub fn formatted(&self) -> String {
        format!(
            "Name: {}\nContact: {}\nOrganizations: {}",
            self.name,
            self.contact,
            self.organizations.join(", ")
        )
    }
}

/// Asks the model to structure the résumé. Malformed JSON is returned as
/// `LlmError::Parse`; no retry happens at this layer.
pub async fn parse_resume(llm: &dyn ChatModel, resume_text: &str) -> Result<ParsedResume, LlmError> {
    let prompt = fill(RESUME_PARSE_PROMPT, &[("resume_text", resume_text)]);
    let system = format!("{RESUME_PARSE_SYSTEM} {JSON_ONLY_SYSTEM}");
    let parsed: ParsedResume = complete_json(llm, &prompt, &system).await?;
    debug!(
        "Parsed resume for {} with {} organizations",
        parsed.name,
        parsed.organizations.len()
    );
    Ok(parsed)
}
