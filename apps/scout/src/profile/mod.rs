//! Personality profile chain: search snippets → DISC/OCEAN analysis → narrative →
//! hiring-manager profile. Three sequential LLM calls, each consuming the previous
//! stage's text.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::prompts::fill;
use crate::llm_client::{ChatModel, LlmError};

pub mod handlers;
pub mod prompts;

use prompts::{
    ANALYSIS_PROMPT, ANALYSIS_SYSTEM, FINAL_PROFILE_PROMPT, FINAL_PROFILE_SYSTEM,
    NARRATIVE_PROMPT, NARRATIVE_SYSTEM,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStage {
    Analysis,
    Narrative,
    FinalProfile,
}

impl fmt::Display for ProfileStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProfileStage::Analysis => "analysis",
            ProfileStage::Narrative => "narrative",
            ProfileStage::FinalProfile => "final_profile",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct ProfileError {
    pub stage: ProfileStage,
    #[source]
    pub source: LlmError,
}

#[derive(Debug, Clone, Serialize)]
pub struct CandidateProfile {
    pub name: String,
    pub analysis: String,
    pub narrative: String,
    pub final_profile: String,
}

async fn run_stage(
    llm: &dyn ChatModel,
    stage: ProfileStage,
    prompt: String,
    system: &str,
) -> Result<String, ProfileError> {
    let text = llm
        .complete(&prompt, system)
        .await
        .map_err(|source| ProfileError { stage, source })?;
    debug!("{stage} stage produced {} chars", text.len());
    Ok(text)
}

/// DISC/OCEAN analysis of the snippets, joined with single spaces.
pub async fn analyze_text(llm: &dyn ChatModel, snippets: &[&str]) -> Result<String, ProfileError> {
    let combined_text = snippets.join(" ");
    let prompt = fill(ANALYSIS_PROMPT, &[("combined_text", combined_text.as_str())]);
    run_stage(llm, ProfileStage::Analysis, prompt, ANALYSIS_SYSTEM).await
}

pub async fn generate_narrative(llm: &dyn ChatModel, analysis: &str) -> Result<String, ProfileError> {
    let prompt = fill(NARRATIVE_PROMPT, &[("analysis", analysis)]);
    run_stage(llm, ProfileStage::Narrative, prompt, NARRATIVE_SYSTEM).await
}

pub async fn create_final_profile(
    llm: &dyn ChatModel,
    narrative: &str,
    name: &str,
) -> Result<String, ProfileError> {
    let prompt = fill(FINAL_PROFILE_PROMPT, &[("name", name), ("narrative", narrative)]);
    run_stage(llm, ProfileStage::FinalProfile, prompt, FINAL_PROFILE_SYSTEM).await
}

/// Runs the full chain. Stops at the first failing stage and reports it.
pub async fn build_profile(
    llm: &dyn ChatModel,
    name: &str,
    snippets: &[&str],
) -> Result<CandidateProfile, ProfileError> {
    let analysis = analyze_text(llm, snippets).await?;
    let narrative = generate_narrative(llm, &analysis).await?;
    let final_profile = create_final_profile(llm, &narrative, name).await?;

    Ok(CandidateProfile {
        name: name.to_string(),
        analysis,
        narrative,
        final_profile,
    })
}
