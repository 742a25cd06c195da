//! AutoConnect Server Library
//!
//! Bill scanning service: an uploaded image goes through cloud OCR, the
//! recognized lines go through a language-model parser, and both results
//! are returned to the caller.
//!
//! # Modules
//!
//! - `ocr`: Asynchronous text recognition (submit, then poll)
//! - `parser`: Structured bill extraction from recognized lines
//! - `routes`: HTTP handlers

pub mod config;
pub mod error;
pub mod ocr;
pub mod parser;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/v1/health", get(routes::health::health_check))
        .nest("/api/ocr", routes::ocr::router(state.max_upload_bytes()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
