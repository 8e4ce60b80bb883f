//! HTTP API server.
//!
//! Exposes ingestion, question answering, and summarization over JSON.
//! Ingested videos live in memory for the lifetime of the process.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::TubeMindError;
use crate::orchestrator::Orchestrator;
use crate::rag::{AskResponse, SummaryResponse, SummaryStyle};
use crate::session::{SessionInfo, SessionStore};
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
}

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Serve, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let orchestrator = Orchestrator::new(settings, Arc::new(SessionStore::new()))?;
    let app = router(Arc::new(AppState { orchestrator }));

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("TubeMind API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Ingest", "POST /ingest");
    Output::kv("Ask", "POST /ask");
    Output::kv("Summary", "POST /summary");
    Output::kv("Videos", "GET  /videos");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/ingest", post(ingest))
        .route("/ask", post(ask))
        .route("/summary", post(summary))
        .route("/videos", get(list_videos))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct IngestRequest {
    /// YouTube URL or bare video ID
    url: String,
    /// Target chunk size in characters
    #[serde(default)]
    chunk_size: Option<usize>,
}

#[derive(Serialize)]
struct IngestResponse {
    video_id: String,
    chunks_processed: usize,
    message: String,
}

#[derive(Deserialize)]
struct AskRequest {
    video_id: String,
    question: String,
}

#[derive(Deserialize)]
struct SummaryRequest {
    video_id: String,
    /// Unknown or missing styles fall back to brief.
    #[serde(default)]
    summary_type: String,
}

impl SummaryRequest {
    fn style(&self) -> SummaryStyle {
        self.summary_type.parse().unwrap_or_default()
    }
}

#[derive(Serialize)]
struct VideosResponse {
    videos: Vec<String>,
    count: usize,
    details: Vec<SessionInfo>,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    kind: &'static str,
}

/// Library error carried to the HTTP boundary.
#[derive(Debug)]
struct ApiError(TubeMindError);

impl From<TubeMindError> for ApiError {
    fn from(e: TubeMindError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            warn!("Request failed: {}", self.0);
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
            kind: self.0.kind(),
        };
        (status, Json(body)).into_response()
    }
}

/// JSON body extractor whose rejections use the API error shape.
struct ApiJson<T>(T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| TubeMindError::InvalidInput(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// HTTP status for a library error.
fn status_for(err: &TubeMindError) -> StatusCode {
    match err {
        TubeMindError::InvalidIdentifier(_) | TubeMindError::InvalidInput(_) => {
            StatusCode::BAD_REQUEST
        }
        TubeMindError::IndexNotBuilt(_) => StatusCode::NOT_FOUND,
        TubeMindError::NoCaptionsAvailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        e if e.is_remote() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// === Handlers ===

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "TubeMind API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "ingest": "POST /ingest",
            "ask": "POST /ask",
            "summary": "POST /summary",
            "videos": "GET /videos",
            "health": "GET /health",
        }
    }))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ingest(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<IngestRequest>,
) -> Result<Json<IngestResponse>, ApiError> {
    let report = state.orchestrator.ingest(&req.url, req.chunk_size).await?;
    Ok(Json(IngestResponse {
        message: format!(
            "Video ingested successfully! Processed {} chunks.",
            report.chunks_processed
        ),
        video_id: report.video_id,
        chunks_processed: report.chunks_processed,
    }))
}

async fn ask(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let response = state.orchestrator.ask(&req.video_id, &req.question).await?;
    Ok(Json(response))
}

async fn summary(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<SummaryRequest>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let response = state
        .orchestrator
        .summarize(&req.video_id, req.style())
        .await?;
    Ok(Json(response))
}

async fn list_videos(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let videos: Vec<String> = state.orchestrator.list_sessions().await.into_iter().collect();
    let details = state.orchestrator.sessions().list_details().await;
    Json(VideosResponse {
        count: videos.len(),
        videos,
        details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::CaptionSegment;
    use crate::test_utils::{FakeCaptions, FakeEmbedder, FakeGenerator};

    const VIDEO: &str = "dQw4w9WgXcQ";

    fn state(generator: FakeGenerator) -> Arc<AppState> {
        let mut settings = Settings::default();
        settings.embedding.batch_delay_ms = 0;
        let segments = vec![
            CaptionSegment::new("intro".to_string(), 0.0, 3.0),
            CaptionSegment::new("details here".to_string(), 3.0, 4.0),
        ];
        let orchestrator = Orchestrator::with_components(
            settings,
            Arc::new(FakeCaptions::new().with_video(VIDEO, segments)),
            Arc::new(FakeEmbedder::new(4)),
            Arc::new(generator),
            Arc::new(SessionStore::new()),
        );
        Arc::new(AppState { orchestrator })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (TubeMindError::InvalidIdentifier("x".into()), StatusCode::BAD_REQUEST),
            (TubeMindError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (TubeMindError::IndexNotBuilt("x".into()), StatusCode::NOT_FOUND),
            (TubeMindError::NoCaptionsAvailable("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (TubeMindError::RemoteEmbedding("x".into()), StatusCode::BAD_GATEWAY),
            (TubeMindError::RemoteGeneration("x".into()), StatusCode::BAD_GATEWAY),
            (TubeMindError::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(status_for(&err), status, "{:?}", err);
        }
    }

    #[test]
    fn test_request_defaults() {
        let req: SummaryRequest = serde_json::from_str(r#"{"video_id":"abc"}"#).unwrap();
        assert_eq!(req.style(), SummaryStyle::Brief);

        let req: SummaryRequest =
            serde_json::from_str(r#"{"video_id":"abc","summary_type":"bullet_points"}"#).unwrap();
        assert_eq!(req.style(), SummaryStyle::BulletPoints);

        let req: SummaryRequest =
            serde_json::from_str(r#"{"video_id":"abc","summary_type":"haiku"}"#).unwrap();
        assert_eq!(req.style(), SummaryStyle::Brief);

        let req: IngestRequest = serde_json::from_str(r#"{"url":"abc"}"#).unwrap();
        assert_eq!(req.chunk_size, None);
    }

    #[tokio::test]
    async fn test_error_body_carries_kind() {
        let response =
            ApiError(TubeMindError::IndexNotBuilt(VIDEO.to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["kind"], "index_not_built");
        assert_eq!(
            body["error"],
            "Video dQw4w9WgXcQ not found. Please ingest it first."
        );
    }

    #[tokio::test]
    async fn test_ingest_ask_and_list() {
        let state = state(FakeGenerator::new("It is an intro."));

        let Json(ingested) = ingest(
            State(state.clone()),
            ApiJson(IngestRequest {
                url: format!("https://youtu.be/{}", VIDEO),
                chunk_size: Some(5),
            }),
        )
        .await
        .unwrap();
        assert_eq!(ingested.video_id, VIDEO);
        assert_eq!(ingested.chunks_processed, 2);
        assert_eq!(
            ingested.message,
            "Video ingested successfully! Processed 2 chunks."
        );

        let Json(answer) = ask(
            State(state.clone()),
            ApiJson(AskRequest {
                video_id: VIDEO.to_string(),
                question: "What is first?".to_string(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(answer.answer, "It is an intro.");
        assert_eq!(answer.sources.len(), 2);

        let body = body_json(list_videos(State(state)).await.into_response()).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["videos"][0], VIDEO);
        assert_eq!(body["details"][0]["chunk_count"], 2);
    }

    #[tokio::test]
    async fn test_summary_for_unknown_video_is_not_found() {
        let state = state(FakeGenerator::new("unused"));
        let err = summary(
            State(state),
            ApiJson(SummaryRequest {
                video_id: "aaaaaaaaaaa".to_string(),
                summary_type: "brief".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    fn json_request(body: &str) -> Request {
        axum::http::Request::builder()
            .method("POST")
            .uri("/summary")
            .header("content-type", "application/json")
            .body(axum::body::Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_uses_error_shape() {
        let rejected =
            ApiJson::<SummaryRequest>::from_request(json_request(r#"{"video_id":"#), &())
                .await
                .err()
                .unwrap();
        let response = rejected.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["kind"], "invalid_input");
        assert!(body["error"].as_str().unwrap().starts_with("Invalid input: "));

        let rejected =
            ApiJson::<IngestRequest>::from_request(json_request(r#"{"chunk_size":5}"#), &())
                .await
                .err()
                .unwrap();
        assert_eq!(rejected.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_summary_type_falls_back_to_brief() {
        let generator = Arc::new(FakeGenerator::new("short"));
        let mut settings = Settings::default();
        settings.embedding.batch_delay_ms = 0;
        let orchestrator = Orchestrator::with_components(
            settings,
            Arc::new(
                FakeCaptions::new().with_video(VIDEO, vec![CaptionSegment::new("intro", 0.0, 3.0)]),
            ),
            Arc::new(FakeEmbedder::new(4)),
            generator.clone(),
            Arc::new(SessionStore::new()),
        );
        orchestrator.ingest(VIDEO, None).await.unwrap();
        let state = Arc::new(AppState { orchestrator });

        let ApiJson(req) = ApiJson::<SummaryRequest>::from_request(
            json_request(r#"{"video_id":"dQw4w9WgXcQ","summary_type":"haiku"}"#),
            &(),
        )
        .await
        .ok()
        .unwrap();
        let Json(response) = summary(State(state), ApiJson(req)).await.unwrap();

        assert_eq!(response.summary, "short");
        assert!(generator.last_prompt().unwrap().starts_with("Brief summary: "));
    }
}
