//! The `/isbn` HTTP endpoint.
//!
//! Resolutions use blocking HTTP clients so each one runs on the blocking pool. Every failure is
//! answered with a 404 and a JSON `{"error": ..}` body.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use bookcache::{BookCandidate, Resolver};
use log::{error, info, trace};
use serde::{Deserialize, Serialize};

pub fn router(resolver: Arc<Resolver>) -> Router {
    Router::new()
        .route("/isbn", get(isbn))
        .route("/health", get(health))
        .with_state(resolver)
}

/// Serves the router on `bind` until Ctrl-C is received.
pub async fn run(resolver: Arc<Resolver>, bind: &str) -> eyre::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for the shutdown signal: {err}");
    }
}

#[derive(Deserialize)]
pub struct IsbnQuery {
    title: Option<String>,
}

/// Body of a successful `/isbn` response.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsbnResponse {
    pub isbn: String,
    /// Serialized as `null` when no source listed an author.
    #[serde(default)]
    pub author: Option<String>,
}

impl From<BookCandidate> for IsbnResponse {
    fn from(book: BookCandidate) -> Self {
        Self {
            isbn: book.isbn,
            author: book.author,
        }
    }
}

/// A failed lookup, always answered with `404 {"error": message}`.
#[derive(Debug)]
pub struct ApiError(String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.0 });
        (StatusCode::NOT_FOUND, Json(body)).into_response()
    }
}

impl From<bookcache::Error> for ApiError {
    fn from(err: bookcache::Error) -> Self {
        if !err.is_not_found() {
            error!("Unexpected resolution error: {err}");
        }
        Self(err.to_string())
    }
}

async fn isbn(
    State(resolver): State<Arc<Resolver>>,
    query: Option<Query<IsbnQuery>>,
) -> Result<Json<IsbnResponse>, ApiError> {
    let Some(title) = query.and_then(|Query(query)| query.title) else {
        return Err(ApiError("The 'title' query parameter is required".to_owned()));
    };
    trace!("GET /isbn for '{title}'");

    let book = tokio::task::spawn_blocking(move || resolver.resolve(&title))
        .await
        .map_err(|err| {
            error!("Resolution task failed: {err}");
            ApiError(format!("Resolution failed: {err}"))
        })??;

    Ok(Json(book.into()))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
