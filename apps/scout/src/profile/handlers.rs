use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::profile::build_profile;
use crate::render;
use crate::resume::parser::ParsedResume;
use crate::search::candidate::search_candidate;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateProfileForm {
    /// JSON-serialised `ParsedResume`, as embedded in the résumé page.
    pub parsed_resume: String,
}

/// POST /create_profile
pub async fn handle_create_profile(
    State(state): State<AppState>,
    Form(form): Form<CreateProfileForm>,
) -> Result<Html<String>, AppError> {
    let parsed: ParsedResume = serde_json::from_str(&form.parsed_resume)
        .map_err(|e| AppError::Validation(format!("parsed_resume is not valid JSON: {e}")))?;

    let search = search_candidate(state.search.as_ref(), &parsed.name, &parsed.organizations).await;
    let snippets = search.snippets();
    info!(
        "Building profile for {} from {} snippets",
        parsed.name,
        snippets.len()
    );

    let profile = build_profile(state.llm.as_ref(), &parsed.name, &snippets).await?;
    Ok(Html(render::profile_page(&profile)))
}
