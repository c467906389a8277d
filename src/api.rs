use crate::document::Document;
use crate::engine::{SearchEngine, SearchOptions, DEFAULT_RESULT_LIMIT};
use crate::ranking::{RankStats, DEFAULT_MIN_SIMILARITY};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(alias = "query")]
    pub q: String,
    #[serde(default)]
    pub min_similarity: Option<f64>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub documents: Vec<HitResponse>,
    pub total: usize,
    pub query: String,
    pub stats: RankStats,
}

#[derive(Debug, Serialize)]
pub struct HitResponse {
    #[serde(flatten)]
    pub document: Document,
    pub similarity: f64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_documents: usize,
    pub with_full_text: usize,
    pub avg_full_text_chars: f64,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = format!("{:#}", self.0);
        tracing::error!("API error: {}", message);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(message)),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

// ========== Handlers ==========

/// Run an engine call on the blocking pool; it may read and parse the collection file
async fn run_blocking<T, F>(engine: Arc<SearchEngine>, f: F) -> Result<T, AppError>
where
    F: FnOnce(&SearchEngine) -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(move || f(&engine)).await??)
}

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn search_documents(
    State(engine): State<Arc<SearchEngine>>,
    Query(req): Query<SearchRequest>,
) -> Result<impl IntoResponse, AppError> {
    let options = SearchOptions {
        min_similarity: req.min_similarity.unwrap_or(DEFAULT_MIN_SIMILARITY),
        limit: req.limit.or(Some(DEFAULT_RESULT_LIMIT)),
        offset: req.offset.unwrap_or(0),
    };

    let query = req.q.clone();
    let result = run_blocking(engine, move |engine| engine.search(&query, &options)).await?;

    let response = SearchResponse {
        documents: result
            .documents
            .into_iter()
            .zip(result.scores)
            .map(|(document, similarity)| HitResponse {
                document,
                similarity,
            })
            .collect(),
        total: result.total,
        query: req.q,
        stats: result.stats,
    };

    Ok(Json(ApiResponse::success(response)))
}

async fn get_document(
    State(engine): State<Arc<SearchEngine>>,
    Path(app_no): Path<String>,
) -> Result<Response, AppError> {
    let key = app_no.clone();
    let found = run_blocking(engine, move |engine| engine.get_document(&key)).await?;

    if let Some(doc) = found {
        Ok(Json(ApiResponse::success(doc)).into_response())
    } else {
        Ok((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error(format!(
                "Document with app_no '{}' not found",
                app_no
            ))),
        )
            .into_response())
    }
}

async fn get_stats(State(engine): State<Arc<SearchEngine>>) -> Result<impl IntoResponse, AppError> {
    let stats = run_blocking(engine, |engine| engine.stats()).await?;

    let response = StatsResponse {
        total_documents: stats.total_documents,
        with_full_text: stats.with_full_text,
        avg_full_text_chars: stats.avg_full_text_chars,
    };

    Ok(Json(ApiResponse::success(response)))
}

async fn reload_collection(
    State(engine): State<Arc<SearchEngine>>,
) -> Result<impl IntoResponse, AppError> {
    let count = run_blocking(engine, |engine| {
        engine.reload();
        engine.document_count()
    })
    .await?;
    Ok(Json(ApiResponse::success(count)))
}

// ========== Router ==========

pub fn create_router(engine: Arc<SearchEngine>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/search", get(search_documents))
        .route("/documents/:app_no", get(get_document))
        .route("/stats", get(get_stats))
        .route("/reload", post(reload_collection))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(engine)
}
