pub mod gemini;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use furqan_core::{reference, SearchEngine, Verse, VerseKey};
use gemini::{GeminiClient, Language};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

type ApiError = (StatusCode, Json<Value>);

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub gemini: GeminiClient,
}

#[derive(Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
    #[serde(rename = "numResults", default = "default_num_results")]
    pub num_results: i64,
}

fn default_num_results() -> i64 {
    3
}

#[derive(Deserialize)]
pub struct SuggestRequest {
    pub problem: Option<String>,
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct TafseerRequest {
    #[serde(rename = "verseKey")]
    pub verse_key: Option<String>,
    pub translation: Option<String>,
    pub language: Option<String>,
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

#[derive(Serialize)]
pub struct SuggestResponse {
    #[serde(flatten)]
    pub verse: Verse,
    pub eng_tafseer: String,
    pub urdu_tafseer: String,
}

pub fn build_app(engine: Arc<SearchEngine>, static_dir: impl AsRef<std::path::Path>) -> Result<Router> {
    let state = AppState { engine, gemini: GeminiClient::new()? };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    // The built frontend, with client-side routes falling back to index.html.
    let static_dir = static_dir.as_ref();
    let frontend = ServeDir::new(static_dir)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/search", post(search_handler))
        .route("/api/verse/:reference", get(verse_handler))
        .route("/api/suggest", post(suggest_handler))
        .route("/api/tafseer", post(tafseer_handler))
        .fallback_service(frontend)
        .with_state(state)
        .layer(cors);
    Ok(app)
}

fn bad_request(message: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message.into() })))
}

fn require(field: Option<String>, message: &str) -> Result<String, ApiError> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(bad_request(message)),
    }
}

pub async fn search_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<Vec<Verse>>, ApiError> {
    let query = require(req.query, "No query provided")?;
    let top_n = usize::try_from(req.num_results).unwrap_or(0);

    let results: Vec<Verse> = state.engine.search(&query, top_n).into_iter().cloned().collect();
    tracing::debug!(%query, top_n, hits = results.len(), "search served");
    Ok(Json(results))
}

pub async fn verse_handler(
    State(state): State<AppState>,
    Path(reference): Path<String>,
) -> Result<Json<Verse>, ApiError> {
    match state.engine.lookup(&reference) {
        Some(verse) => Ok(Json(verse.clone())),
        None => Err((StatusCode::NOT_FOUND, Json(json!({ "error": "Verse not found" })))),
    }
}

pub async fn suggest_handler(
    State(state): State<AppState>,
    Json(req): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>, ApiError> {
    let problem = require(req.problem, "No problem description provided")?;
    let api_key = require(req.api_key, "No API key provided")?;

    let suggestion = state
        .gemini
        .suggest_reference(&problem, &api_key)
        .await
        .map_err(|err| bad_request(format!("Error getting AI suggestion: {err}")))?;

    let key = reference::resolve(&suggestion);
    let display = key.map(|k| k.to_string()).unwrap_or_else(|| suggestion.trim().to_string());
    let verse = key
        .and_then(|k| state.engine.corpus().get_by_key(k))
        .ok_or_else(|| {
            bad_request(format!("Verse reference {display} not found in the Quran dataset."))
        })?
        .clone();

    tracing::info!(verse_key = %verse.key, "generating tafseer for suggested verse");
    let eng_tafseer = state
        .gemini
        .tafseer(verse.key, &verse.english, Language::English, &api_key)
        .await
        .unwrap_or_else(|err| format!("Error generating tafseer: {err}"));
    let urdu_tafseer = state
        .gemini
        .tafseer(verse.key, &verse.urdu, Language::Urdu, &api_key)
        .await
        .unwrap_or_else(|err| format!("Error generating tafseer: {err}"));

    Ok(Json(SuggestResponse { verse, eng_tafseer, urdu_tafseer }))
}

pub async fn tafseer_handler(
    State(state): State<AppState>,
    Json(req): Json<TafseerRequest>,
) -> Result<Json<Value>, ApiError> {
    let missing = || bad_request("Missing required parameters");
    let verse_key = req.verse_key.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let translation = req.translation.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let language = req.language.filter(|v| !v.is_empty()).ok_or_else(missing)?;
    let api_key = req.api_key.filter(|v| !v.is_empty()).ok_or_else(missing)?;

    let key: VerseKey = verse_key
        .parse()
        .map_err(|_| bad_request(format!("Invalid verse key {verse_key}")))?;
    let language = Language::parse(&language)
        .ok_or_else(|| bad_request(format!("Unsupported language {language}")))?;

    let tafseer = state
        .gemini
        .tafseer(key, &translation, language, &api_key)
        .await
        .unwrap_or_else(|err| format!("Error generating tafseer: {err}"));
    Ok(Json(json!({ "tafseer": tafseer })))
}
