//! HTTP surface: `/generate`, `/speak`, audio files, the front-end page.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use moodtune_core::{AudioClip, GenerationError, MoodChat, SynthesisError, AUDIO_URL_PREFIX};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Page served at `/` when `static_dir/index.html` is absent.
const EMBEDDED_INDEX: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html"));

pub struct AppState {
    pub chat: MoodChat,
    pub static_dir: PathBuf,
}

#[derive(Deserialize)]
struct GenerateRequest {
    #[serde(default)]
    input: Option<String>,
}

#[derive(Serialize)]
struct GenerateResponse {
    output: String,
}

#[derive(Deserialize)]
struct SpeakRequest {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct SpeakResponse {
    audio: Vec<AudioClip>,
}

/// Request-scoped failure; the process keeps serving.
pub enum ApiError {
    BadRequest(String),
    Generation(GenerationError),
    Synthesis(SynthesisError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, format!("invalid JSON body: {}", detail)),
            ApiError::Generation(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("generation failed: {}", e)),
            ApiError::Synthesis(e) => (StatusCode::INTERNAL_SERVER_ERROR, format!("tts failed: {}", e)),
        };
        (
            status,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let audio_files = ServeDir::new(state.chat.audio_store().dir());
    Router::new()
        .route("/health", get(health))
        .route("/", get(serve_index))
        .route("/generate", post(generate_handler))
        .route("/speak", post(speak_handler))
        .nest_service(AUDIO_URL_PREFIX, audio_files)
        .with_state(state)
        .layer(axum::middleware::from_fn(log_request))
        .layer(CorsLayer::permissive())
}

async fn log_request(request: Request<Body>, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());
    tracing::info!(method = %request.method(), path = %request.uri().path(), %peer, "request");
    next.run(request).await
}

async fn health() -> &'static str {
    "OK"
}

async fn serve_index(State(state): State<Arc<AppState>>) -> Html<String> {
    let path = state.static_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page),
        Err(_) => Html(EMBEDDED_INDEX.to_string()),
    }
}

/// Parses a JSON body whatever the `Content-Type` header says.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// POST /generate: `{ "input": ... }` -> `{ "output": ... }`.
async fn generate_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, ApiError> {
    let body: GenerateRequest = parse_json(&body)?;
    let input = body.input.unwrap_or_default();
    let output = state.chat.generate(&input).await.map_err(ApiError::Generation)?;
    Ok(Json(GenerateResponse { output }))
}

/// POST /speak: `{ "text": ... }` -> `{ "audio": [{ "lang", "url" }] }`.
async fn speak_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SpeakResponse>, ApiError> {
    let body: SpeakRequest = parse_json(&body)?;
    let text = body.text.unwrap_or_default();
    let clip = state.chat.speak(text.trim()).await.map_err(ApiError::Synthesis)?;
    Ok(Json(SpeakResponse { audio: vec![clip] }))
}
