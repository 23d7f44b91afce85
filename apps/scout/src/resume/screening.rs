//! Keyword screening: scores a plain `Key: Value` résumé against required skills.
//!
//! Score = matched skill count + 0.5 × years of experience. Matching iterates the
//! candidate's list, so a skill listed twice counts twice.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_THRESHOLD: f64 = 5.0;
const YEARS_WEIGHT: f64 = 0.5;

#[derive(Debug, Error, PartialEq)]
pub enum ScreeningError {
    #[error("Line {line} is not in 'Key: Value' form: {text:?}")]
    MalformedLine { line: usize, text: String },

    #[error("Resume is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("Experience must start with a whole number of years, got {0:?}")]
    InvalidExperience(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub count: usize,
    pub matched: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub name: Option<String>,
    pub matched_skills: Vec<String>,
    pub matched_count: usize,
    pub score: f64,
    pub threshold: f64,
    pub passed: bool,
}

/// Splits `Key: Value` lines into a lowercase-keyed map. Blank lines are skipped.
pub fn parse_resume_fields(resume_text: &str) -> Result<HashMap<String, String>, ScreeningError> {
    let mut fields = HashMap::new();
    for (idx, line) in resume_text.trim().lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = line
            .split_once(": ")
            .ok_or_else(|| ScreeningError::MalformedLine {
                line: idx + 1,
                text: line.to_string(),
            })?;
        fields.insert(key.trim().to_lowercase(), value.trim().to_string());
    }
    Ok(fields)
}

/// Returns the candidate skills (comma-separated) that appear in `required`,
/// compared trimmed and lowercased, in candidate order with duplicates kept.
pub fn match_keywords<S: AsRef<str>>(skills: &str, required: &[S]) -> KeywordMatch {
    let required: Vec<String> = required
        .iter()
        .map(|s| s.as_ref().trim().to_lowercase())
        .collect();

    let matched: Vec<String> = skills
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| required.contains(s))
        .collect();

    KeywordMatch {
        count: matched.len(),
        matched,
    }
}

/// `matched_count + 0.5 × N` where N is the leading integer of `experience` ("5 years").
pub fn calculate_score(matched_count: usize, experience: &str) -> Result<f64, ScreeningError> {
    let lead = experience.split(' ').next().unwrap_or_default();
    let years: i64 = lead
        .parse()
        .map_err(|_| ScreeningError::InvalidExperience(experience.to_string()))?;
    Ok(matched_count as f64 + years as f64 * YEARS_WEIGHT)
}

/// Passes when the score meets or exceeds the threshold.
pub fn filter_candidates(score: f64, threshold: f64) -> bool {
    score >= threshold
}

/// Parses, matches, scores and filters a résumé in one go.
pub fn screen_candidate<S: AsRef<str>>(
    resume_text: &str,
    required: &[S],
    threshold: f64,
) -> Result<ScreeningResult, ScreeningError> {
    let fields = parse_resume_fields(resume_text)?;
    let skills = fields
        .get("skills")
        .ok_or(ScreeningError::MissingField("skills"))?;
    let experience = fields
        .get("experience")
        .ok_or(ScreeningError::MissingField("experience"))?;

    let keywords = match_keywords(skills, required);
    let score = calculate_score(keywords.count, experience)?;

    Ok(ScreeningResult {
        name: fields.get("name").cloned(),
        matched_count: keywords.count,
        matched_skills: keywords.matched,
        score,
        threshold,
        passed: filter_candidates(score, threshold),
    })
}
