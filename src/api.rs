use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{get, patch, put},
    Json, Router,
};
use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, services::ServeDir};
use uuid::Uuid;

use crate::config::Config;
use crate::models::Entry;
use crate::store::{EntryStore, StoreError};

pub type AppState = Arc<AppData>;

pub struct AppData {
    pub store: EntryStore,
    pub config: Config,
}

/// Request-local API failures, rendered as `{"error": message}` JSON.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal,
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(message) => ApiError::BadRequest(message),
            StoreError::NotFound => ApiError::NotFound("Entry not found.".to_string()),
            other => {
                log::error!("store failure: {other}");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong.".to_string(),
            ),
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

pub fn router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api/entries", get(list_entries).post(create_entry))
        .route("/api/entries/:id", put(update_entry).delete(delete_entry))
        .route("/api/entries/:id/done", patch(set_done));

    // The dev client runs from its own server; only production serves the
    // bundle and the SPA entry document.
    if !state.config.dev_mode {
        app = app
            .nest_service("/static", ServeDir::new(&state.config.static_dir))
            .fallback(serve_index);
    }

    app.layer(RequestBodyLimitLayer::new(2 * 1024 * 1024))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_entries(State(state): State<AppState>) -> Result<Json<Vec<Entry>>, ApiError> {
    let entries = state.store.list().await?;
    Ok(Json(entries))
}

async fn create_entry(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let title = require_title(&body)?;
    let note = optional_text(&body, "note");
    let date = parse_date(&body)?;

    let user_id = optional_text(&body, "userId")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| state.config.default_user_id.clone());

    let entry = state
        .store
        .create(title, note.as_deref(), date, &user_id)
        .await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Entry>, ApiError> {
    let title = require_title(&body)?;
    let note = optional_text(&body, "note");

    let entry = state.store.update_fields(id, title, note.as_deref()).await?;
    Ok(Json(entry))
}

async fn set_done(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Entry>, ApiError> {
    let done = body
        .get("done")
        .and_then(Value::as_bool)
        .ok_or_else(|| ApiError::BadRequest("done must be a boolean.".to_string()))?;

    let entry = state.store.set_done(id, done).await?;
    Ok(Json(entry))
}

async fn delete_entry(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<StatusCode, ApiError> {
    state.store.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// SPA fallback: any unmatched non-API path gets the client entry
/// document, read from disk with a compiled-in copy as backstop.
async fn serve_index(State(state): State<AppState>, uri: Uri) -> Response {
    if uri.path().starts_with("/api") || uri.path() == "/health" {
        return StatusCode::NOT_FOUND.into_response();
    }

    let index_path = state.config.static_dir.join("index.html");
    let html = tokio::fs::read_to_string(&index_path)
        .await
        .unwrap_or_else(|_| include_str!("../static/index.html").to_string());
    Html(html).into_response()
}

fn require_title(body: &Value) -> Result<&str, ApiError> {
    body.get("title")
        .and_then(Value::as_str)
        .filter(|title| !title.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("Title is required.".to_string()))
}

/// Reads a string field, treating non-string values the same as absent
/// ones. The store owns blank-to-absent normalization.
fn optional_text(body: &Value, field: &str) -> Option<String> {
    body.get(field).and_then(Value::as_str).map(str::to_string)
}

fn parse_date(body: &Value) -> Result<Option<NaiveDate>, ApiError> {
    let value = match body.get("date") {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let text = value
        .as_str()
        .ok_or_else(|| ApiError::BadRequest("date must be an ISO-8601 date.".to_string()))?;
    if text.trim().is_empty() {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(timestamp.date_naive()));
    }

    Err(ApiError::BadRequest(
        "date must be an ISO-8601 date.".to_string(),
    ))
}
