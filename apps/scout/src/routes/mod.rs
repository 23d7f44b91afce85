pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::profile::handlers::handle_create_profile;
use crate::resume::handlers::{handle_index, handle_screen_resume, handle_upload_resume};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(handle_index))
        .route("/upload_resume", post(handle_upload_resume))
        .route("/create_profile", post(handle_create_profile))
        .route("/screen_resume", post(handle_screen_resume))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::testing::ScriptedModel;
    use crate::resume::intake::tests::make_docx;
    use crate::search::candidate::tests::EchoSearch;

    const BOUNDARY: &str = "scout-test-boundary";

    fn app(llm: Arc<ScriptedModel>, search: Arc<EchoSearch>) -> Router {
        app_with_limit(llm, search, 1024 * 1024)
    }

    fn app_with_limit(
        llm: Arc<ScriptedModel>,
        search: Arc<EchoSearch>,
        max_upload_bytes: usize,
    ) -> Router {
        build_router(AppState {
            llm,
            search,
            max_upload_bytes,
        })
    }

    fn default_app() -> Router {
        app(
            Arc::new(ScriptedModel::default()),
            Arc::new(EchoSearch::default()),
        )
    }

    fn multipart_body(field: &str, filename: &str, data: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/upload_resume")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = default_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "scout-api");
    }

    #[tokio::test]
    async fn test_index_serves_upload_form() {
        let response = default_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("resume_file"));
    }

    #[tokio::test]
    async fn test_upload_without_file_part_is_rejected() {
        let body = multipart_body("cover_letter", "letter.pdf", b"data");
        let response = default_app().oneshot(upload_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "No file part");
    }

    #[tokio::test]
    async fn test_upload_with_empty_filename_is_rejected() {
        let body = multipart_body("resume_file", "", b"data");
        let response = default_app().oneshot(upload_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["message"], "No selected file");
    }

    #[tokio::test]
    async fn test_upload_with_disallowed_extension_is_rejected() {
        let llm = Arc::new(ScriptedModel::default());
        let body = multipart_body("resume_file", "resume.txt", b"Name: Jane");
        let response = app(llm.clone(), Arc::new(EchoSearch::default()))
            .oneshot(upload_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_upload_over_body_limit_is_payload_too_large() {
        let llm = Arc::new(ScriptedModel::default());
        let body = multipart_body("resume_file", "big.pdf", &[b'x'; 4096]);
        let response = app_with_limit(llm.clone(), Arc::new(EchoSearch::default()), 1024)
            .oneshot(upload_request(body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body_json(response).await["error"]["code"], "PAYLOAD_TOO_LARGE");
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_profile_final_stage_failure_names_stage() {
        let llm = Arc::new(ScriptedModel::replying(&["analysis", "narrative"]));
        let parsed = json!({"name": "Jane", "organizations": []}).to_string();
        let response = app(llm, Arc::new(EchoSearch::default()))
            .oneshot(profile_request(&parsed))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            body_json(response).await["error"]["message"],
            "Profile generation failed at the final_profile stage"
        );
    }

    #[tokio::test]
    async fn test_upload_docx_parses_and_searches() {
        let llm = Arc::new(ScriptedModel::replying(&[
            r#"{"name": "Jane Doe", "contact": "omitted", "organizations": ["Acme"]}"#,
        ]));
        let search = Arc::new(EchoSearch::default());
        let docx = make_docx(&["Jane Doe", "Engineer at Acme"]);

        let response = app(llm.clone(), search.clone())
            .oneshot(upload_request(multipart_body("resume_file", "Jane.DOCX", &docx)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("Name: Jane Doe"));
        assert!(page.contains("Search results (3)"));
        assert!(page.contains(r#"name="parsed_resume""#));

        let prompts = llm.prompts.lock().unwrap();
        assert!(prompts[0].0.contains("Engineer at Acme"));
        assert_eq!(search.queries.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_upload_with_bad_llm_json_is_bad_gateway() {
        let llm = Arc::new(ScriptedModel::replying(&["not json"]));
        let docx = make_docx(&["Jane Doe"]);
        let response = app(llm, Arc::new(EchoSearch::default()))
            .oneshot(upload_request(multipart_body("resume_file", "cv.docx", &docx)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"]["code"], "LLM_ERROR");
    }

    fn profile_request(parsed_resume: &str) -> Request<Body> {
        let form = format!("parsed_resume={}", form_encode(parsed_resume));
        Request::builder()
            .method("POST")
            .uri("/create_profile")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap()
    }

    fn form_encode(value: &str) -> String {
        value
            .bytes()
            .map(|b| match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' => {
                    (b as char).to_string()
                }
                _ => format!("%{b:02X}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_create_profile_runs_all_three_stages() {
        let llm = Arc::new(ScriptedModel::replying(&[
            "High dominance",
            "Jane leads from the front.",
            "Hire Jane.",
        ]));
        let search = Arc::new(EchoSearch::default());
        let parsed = json!({"name": "Jane", "contact": "", "organizations": ["Acme"]}).to_string();

        let response = app(llm.clone(), search)
            .oneshot(profile_request(&parsed))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let page = body_text(response).await;
        assert!(page.contains("<pre>Hire Jane.</pre>"));
        assert!(page.contains("<pre>High dominance</pre>"));

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 3);
        assert!(prompts[0].0.contains("snippet for Jane Acme site:linkedin.com"));
        assert!(prompts[1].0.contains("High dominance"));
        assert!(prompts[2].0.contains("Jane leads from the front."));
    }

    #[tokio::test]
    async fn test_create_profile_rejects_malformed_json() {
        let llm = Arc::new(ScriptedModel::default());
        let response = app(llm.clone(), Arc::new(EchoSearch::default()))
            .oneshot(profile_request("{not json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(llm.calls(), 0);
    }

    #[tokio::test]
    async fn test_create_profile_reports_failing_stage() {
        let llm = Arc::new(ScriptedModel::replying(&["analysis only"]));
        let parsed = json!({"name": "Jane", "organizations": []}).to_string();
        let response = app(llm, Arc::new(EchoSearch::default()))
            .oneshot(profile_request(&parsed))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "PROFILE_ERROR");
        assert_eq!(
            body["error"]["message"],
            "Profile generation failed at the narrative stage"
        );
    }

    fn screen_request(payload: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/screen_resume")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_screen_resume_scores_candidate() {
        let payload = json!({
            "resume_text": "Name: Jane\nSkills: Rust, SQL, Python\nExperience: 10 years",
            "required_skills": ["rust", "sql"],
        });
        let response = default_app().oneshot(screen_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["name"], "Jane");
        assert_eq!(body["matched_count"], 2);
        assert_eq!(body["score"], 7.0);
        assert_eq!(body["threshold"], 5.0);
        assert_eq!(body["passed"], true);
    }

    #[tokio::test]
    async fn test_screen_resume_with_bad_experience_is_unprocessable() {
        let payload = json!({
            "resume_text": "Skills: Rust\nExperience: lots",
            "required_skills": ["rust"],
            "threshold": 1.0,
        });
        let response = default_app().oneshot(screen_request(payload)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
