//! REST API over the book catalog.
//!
//! **Books:**
//! - `POST /api/addBook`: create or update a book from a JSON payload
//! - `GET  /api/books`: list all books
//! - `GET  /api/book/{id}`: full detail for one book
//!
//! **Visualization:**
//! - `POST /api/upload`: multipart RDF/XML upload, answered with `{nodes, edges}`
//!
//! **Health:**
//! - `GET  /health`: server status
//!
//! Failures other than validation and not-found answer 500 with an empty
//! body; the cause is logged.

use std::path::Path;
use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, Multipart, Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use oxigraph::model::Triple;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use crate::catalog::{BookDetail, BookError, BookInput, BookSummary, Catalog, StoreError, parse_rdf_xml_triples};
use crate::config::ServerConfig;
use crate::notify::{Notifier, notifier_from_config, notify_best_effort};
use crate::visualize::{VisGraph, to_vis_graph};

/// Largest accepted request body (uploads included).
pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

// ── Server state ──────────────────────────────────────────────────────────

/// Shared handler state.
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppState {
    pub fn new(catalog: Catalog, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            catalog: Arc::new(catalog),
            notifier,
        }
    }

    /// Build the catalog and notifier described by `config`.
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(Catalog::new(&config.store_path), notifier_from_config(config))
    }
}

// ── Errors ────────────────────────────────────────────────────────────────

/// Handler failure, mapped onto the API's status codes.
#[derive(Debug)]
pub enum ApiError {
    /// 400 with the message as body.
    BadRequest(String),
    /// 404 with an empty body.
    NotFound(String),
    /// 500 with an empty body; the message is only logged.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::BadRequest(message) => {
                tracing::debug!(%message, "rejected request");
                (StatusCode::BAD_REQUEST, message).into_response()
            }
            Self::NotFound(message) => {
                tracing::debug!(%message, "not found");
                StatusCode::NOT_FOUND.into_response()
            }
            Self::Internal(message) => {
                tracing::error!(error = %message, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl From<BookError> for ApiError {
    fn from(e: BookError) -> Self {
        match e {
            BookError::MissingId | BookError::InvalidId { .. } => Self::BadRequest(e.to_string()),
            BookError::NotFound { .. } => Self::NotFound(e.to_string()),
            BookError::Store(e) => e.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(e: MultipartRejection) -> Self {
        Self::Internal(format!("multipart error: {}", e.body_text()))
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Internal(format!("blocking task failed: {e}"))
    }
}

// ── Response types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Books in the catalog, absent when the catalog cannot be read.
    pub books: Option<usize>,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let catalog = Arc::clone(&state.catalog);
    let books = tokio::task::spawn_blocking(move || catalog.book_count())
        .await
        .ok()
        .and_then(Result::ok);
    Json(HealthResponse {
        status: if books.is_some() { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        books,
    })
}

async fn upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VisGraph>, ApiError> {
    let mut multipart = multipart?;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(format!("multipart error: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::Internal(format!("multipart error: {e}")))?;
        upload = Some((name, bytes));
        break;
    }
    let (name, bytes) =
        upload.ok_or_else(|| ApiError::Internal("multipart field `file` missing".into()))?;

    tracing::info!(file = %name, bytes = bytes.len(), "visualizing upload");
    let vis = tokio::task::spawn_blocking(move || {
        parse_rdf_xml_triples(&bytes[..], &name)
            .map(|triples| to_vis_graph(triples.iter().map(Triple::as_ref)))
    })
    .await??;
    Ok(Json(vis))
}

async fn add_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(input) = payload?;
    let catalog = Arc::clone(&state.catalog);
    let id = tokio::task::spawn_blocking(move || catalog.add_book(&input)).await??;

    // Fire and forget: the response does not wait for the chatbot.
    let notifier = Arc::clone(&state.notifier);
    let notify_id = id.clone();
    let _ = tokio::task::spawn_blocking(move || notify_best_effort(notifier.as_ref(), &notify_id));

    Ok(format!("Book '{id}' saved successfully!"))
}

async fn list_books(State(state): State<Arc<AppState>>) -> Result<Json<Vec<BookSummary>>, ApiError> {
    let catalog = Arc::clone(&state.catalog);
    let books = tokio::task::spawn_blocking(move || catalog.list_books()).await??;
    Ok(Json(books))
}

async fn book_details(
    State(state): State<Arc<AppState>>,
    UrlPath(id): UrlPath<String>,
) -> Result<Json<BookDetail>, ApiError> {
    let catalog = Arc::clone(&state.catalog);
    let detail = tokio::task::spawn_blocking(move || catalog.get_book(&id)).await??;
    Ok(Json(detail))
}

// ── Router ────────────────────────────────────────────────────────────────

/// Build the application router. Unmatched paths are served from
/// `static_dir` when one is given.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/api/upload", post(upload))
        .route("/api/addBook", post(add_book))
        .route("/api/books", get(list_books))
        .route("/api/book/{id}", get(book_details))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state));

    match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}
