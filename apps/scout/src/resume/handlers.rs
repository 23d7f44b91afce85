use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Html,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::render;
use crate::resume::intake::{allowed_file, extract_text};
use crate::resume::parser::parse_resume;
use crate::resume::screening::{screen_candidate, ScreeningResult, DEFAULT_THRESHOLD};
use crate::search::candidate::search_candidate;
use crate::state::AppState;

/// Multipart field carrying the uploaded résumé.
pub const RESUME_FIELD: &str = "resume_file";

#[derive(Deserialize)]
pub struct ScreenRequest {
    pub resume_text: String,
    pub required_skills: Vec<String>,
    pub threshold: Option<f64>,
}

fn multipart_error(e: MultipartError) -> AppError {
    match e.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(e.body_text()),
        _ => AppError::Validation(e.body_text()),
    }
}

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render::upload_form())
}

/// POST /upload_resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Html<String>, AppError> {
    let mut upload: Option<(String, Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(multipart_error)?;
        upload = Some((filename, data));
        break;
    }

    let (filename, data) = upload.ok_or_else(|| AppError::Validation("No file part".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    if !allowed_file(&filename) {
        return Err(AppError::Validation(format!(
            "Unsupported file type: {filename}"
        )));
    }

    info!("Extracting text from {filename} ({} bytes)", data.len());
    let text = tokio::task::spawn_blocking(move || extract_text(&filename, &data))
        .await
        .map_err(|e| anyhow::anyhow!("Text extraction task failed: {e}"))??;

    let parsed = parse_resume(state.llm.as_ref(), &text).await?;
    let search = search_candidate(state.search.as_ref(), &parsed.name, &parsed.organizations).await;

    Ok(Html(render::resume_page(&parsed, &search)))
}

/// POST /screen_resume
pub async fn handle_screen_resume(
    Json(req): Json<ScreenRequest>,
) -> Result<Json<ScreeningResult>, AppError> {
    let threshold = req.threshold.unwrap_or(DEFAULT_THRESHOLD);
    let result = screen_candidate(&req.resume_text, &req.required_skills, threshold)?;
    Ok(Json(result))
}
