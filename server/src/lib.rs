use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::{HeaderMap, StatusCode}, routing::{get, post}, Json, Router};
use regex::{Regex, RegexBuilder};
use searchcore::{rank, DocStore, DocTerm, SearchEngine, Weighting};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod errors;

use errors::ApiError;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub term: String,
    pub weighting: Weighting,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub entry: DocTerm,
    pub snippet: Option<String>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub num_terms: usize,
}

#[derive(Deserialize)]
pub struct AddRequest {
    pub doc_id: String,
    pub text: String,
}

#[derive(Deserialize)]
pub struct SelectRequest {
    #[serde(default)]
    pub doc_ids: Vec<String>,
}

#[derive(Serialize)]
pub struct SelectResponse {
    pub num_docs: usize,
    pub loaded: Vec<String>,
    pub missing: Vec<String>,
    pub unreadable: Vec<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<SearchEngine>,
    pub admin_token: Option<String>,
}

/// Open the database at `db_dir`, index it and build the router.
/// `ADMIN_TOKEN` guards the mutating endpoints.
pub fn build_app(db_dir: String) -> Result<Router> {
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    build_app_with_token(db_dir, admin_token)
}

pub fn build_app_with_token(db_dir: String, admin_token: Option<String>) -> Result<Router> {
    let engine = SearchEngine::open(DocStore::open(&db_dir)?)?;
    tracing::info!(db = %db_dir, num_docs = engine.snapshot().document_count(), "engine ready");
    Ok(router(AppState { engine: Arc::new(engine), admin_token }))
}

pub fn router(state: AppState) -> Router {
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

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/stats", get(stats_handler))
        .route("/index/add", post(add_handler))
        .route("/index/select", post(select_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let mut ranked = state.engine.search_text(&params.q)?;
    let total_hits = ranked.len();
    let k = params.k.clamp(1, 100);
    rank::top_n(&mut ranked, k);

    let term = ranked.term().to_string();
    let weighting = ranked.weighting();
    let highlighter = term_regex(&term);
    let results = ranked
        .entries()
        .iter()
        .map(|hit| SearchHit {
            entry: hit.clone(),
            snippet: highlighter.as_ref().and_then(|re| {
                let text = state.engine.document_text(&hit.doc_id).ok()?;
                snippet(&text, re)
            }),
        })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, total_hits, took_s = elapsed.as_secs_f64(), "search");
    Ok(Json(SearchResponse { query: params.q, term, weighting, took_s: elapsed.as_secs_f64(), total_hits, results }))
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<String>) -> Result<Json<serde_json::Value>, ApiError> {
    let text = state.engine.document_text(&doc_id)?;
    Ok(Json(serde_json::json!({ "doc_id": doc_id, "text": text })))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let index = state.engine.snapshot();
    Json(StatsResponse { num_docs: index.document_count(), num_terms: index.term_count() })
}

async fn add_handler(State(state): State<AppState>, headers: HeaderMap, Json(req): Json<AddRequest>) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    authorize(&state, &headers)?;
    let doc_id = req.doc_id.to_lowercase();
    let engine = Arc::clone(&state.engine);
    let id = doc_id.clone();
    // Takes the engine's writer lock, which a running reload holds for the whole rebuild.
    tokio::task::spawn_blocking(move || engine.add_document(&id, &req.text))
        .await
        .map_err(|e| ApiError::Internal(format!("add task failed: {e}")))??;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "doc_id": doc_id }))))
}

async fn select_handler(State(state): State<AppState>, headers: HeaderMap, Json(req): Json<SelectRequest>) -> Result<Json<SelectResponse>, ApiError> {
    authorize(&state, &headers)?;
    let engine = Arc::clone(&state.engine);
    let summary = tokio::task::spawn_blocking(move || engine.reload(&req.doc_ids))
        .await
        .map_err(|e| ApiError::Internal(format!("reload task failed: {e}")))??;
    Ok(Json(SelectResponse {
        num_docs: summary.num_docs,
        loaded: summary.loaded,
        missing: summary.missing,
        unreadable: summary.unreadable,
    }))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err(ApiError::Unauthorized("ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(ApiError::Unauthorized("invalid admin token".into()))
    }
}

fn term_regex(term: &str) -> Option<Regex> {
    if term.is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build().ok()
}

/// Text around the first match of `re`, with every match wrapped in `<em>`.
fn snippet(text: &str, re: &Regex) -> Option<String> {
    if text.is_empty() { return None; }
    let window = match re.find(text) {
        Some(m) => {
            let start = floor_boundary(text, m.start().saturating_sub(100));
            let end = floor_boundary(text, (m.start() + 200).min(text.len()));
            &text[start..end]
        }
        None => &text[..floor_boundary(text, 200.min(text.len()))],
    };
    Some(re.replace_all(window, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).into_owned())
}

fn floor_boundary(s: &str, mut i: usize) -> usize {
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}
