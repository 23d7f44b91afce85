use std::sync::Arc;

use crate::llm_client::ChatModel;
use crate::search::WebSearch;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn ChatModel>,
    pub search: Arc<dyn WebSearch>,
    /// Upper bound for multipart résumé uploads.
    pub max_upload_bytes: usize,
}
