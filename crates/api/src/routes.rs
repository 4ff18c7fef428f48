use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use pipeline::{
    CollectingReporter, GenerateError, GenerateRequest, Generator, MissingCause, MissingSource,
    SerializedGraph,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Instrument;
use uuid::Uuid;

use crate::metrics::{Metrics, MetricsSnapshot, TimedOperation};

pub struct AppState {
    generator: Generator,
    metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(generator: Generator, metrics: Arc<Metrics>) -> Self {
        Self { generator, metrics }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

#[derive(Serialize)]
struct GenerateResponse {
    format: String,
    media_type: String,
    file_name: String,
    triples: usize,
    type_triples: usize,
    treats_triples: usize,
    affects_triples: usize,
    content: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    messages: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    missing: Vec<MissingSource>,
}

/// A failed generation plus whatever was reported along the way.
struct ApiError {
    error: GenerateError,
    messages: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, missing) = match self.error {
            GenerateError::MissingEndpoint(_) => (StatusCode::BAD_REQUEST, Vec::new()),
            GenerateError::MissingData { ref sources } => {
                (StatusCode::UNPROCESSABLE_ENTITY, sources.clone())
            }
            GenerateError::Serialize(_) => (StatusCode::INTERNAL_SERVER_ERROR, Vec::new()),
        };

        let body = ErrorResponse {
            error: self.error.to_string(),
            messages: self.messages,
            missing,
        };
        (status, Json(body)).into_response()
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/generate", post(generate_graph))
        .route("/download", get(download_graph))
        .route("/stats", get(get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn generate_graph(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let graph = run_generation(&state, req).await?;

    Ok(Json(GenerateResponse {
        format: graph.format.to_string(),
        media_type: graph.media_type().to_string(),
        file_name: graph.file_name(),
        triples: graph.summary.total_triples,
        type_triples: graph.summary.type_triples,
        treats_triples: graph.summary.treats_triples,
        affects_triples: graph.summary.affects_triples,
        content: graph.as_text().into_owned(),
    }))
}

async fn download_graph(
    State(state): State<Arc<AppState>>,
    Query(req): Query<GenerateRequest>,
) -> Result<Response, ApiError> {
    let graph = run_generation(&state, req).await?;

    let headers = [
        (header::CONTENT_TYPE, graph.media_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", graph.file_name()),
        ),
    ];
    Ok((headers, graph.bytes).into_response())
}

async fn get_stats(State(state): State<Arc<AppState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}

async fn run_generation(state: &AppState, req: GenerateRequest) -> Result<SerializedGraph, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate", %request_id);

    let reporter = CollectingReporter::new();
    let timer = TimedOperation::start();

    let result = state
        .generator
        .generate(&req, &reporter)
        .instrument(span)
        .await;

    match result {
        Ok(graph) => {
            state
                .metrics
                .record_success(timer.elapsed(), graph.summary.total_triples);
            Ok(graph)
        }
        Err(error) => {
            let fetch_failures = match &error {
                GenerateError::MissingData { sources } => sources
                    .iter()
                    .filter(|s| matches!(s.cause, MissingCause::FetchFailed(_)))
                    .count(),
                _ => 0,
            };
            state.metrics.record_failure(timer.elapsed(), fetch_failures);

            Err(ApiError {
                error,
                messages: reporter.messages(),
            })
        }
    }
}
