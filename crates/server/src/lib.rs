//! # xlstore-server
//!
//! REST API for reading, writing, appending to, deleting, and renaming xlsx
//! files in a fixed storage directory. Each request is validated, resolved to
//! a path inside the storage root, and handed to the codec in
//! [`xlstore_sheet`]; responses are JSON throughout, with errors shaped as
//! `{"error": "..."}`.

pub mod error;
pub mod handlers;
pub mod json;
pub mod paths;
pub mod state;
pub mod validate;

use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use error::ErrorBody;
use serde::{Deserialize, Serialize};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use state::{AppState, ServerConfig};

/// Health check response.
#[derive(Serialize, Deserialize)]
pub struct Health {
    /// Server status ("ok" when healthy).
    pub status: String,
    /// Server version from Cargo.toml.
    pub version: String,
}

/// Health check endpoint handler.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create the application router.
///
/// This is separated from `main()` to allow testing. The file API lives
/// under `/api` behind the extension validator; everything else falls
/// through to the static public directory.
pub fn create_router(config: ServerConfig) -> Router {
    let public_dir = config.public_dir.clone();
    let state = AppState::new(config);

    let api = Router::new()
        .route("/read", get(handlers::read))
        .route("/write", post(handlers::write))
        .route("/append", post(handlers::append))
        .route("/delete", delete(handlers::delete))
        .route("/rename", put(handlers::rename))
        .layer(middleware::from_fn(validate::require_xlsx))
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
}

/// Process-wide fallback: log the panic, answer with a generic 500.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %details, "request handler panicked");

    let body = ErrorBody {
        error: "Something went wrong!".to_string(),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
