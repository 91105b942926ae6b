// src/lib.rs
pub mod config;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod help;
pub mod image;
pub mod models;
pub mod parse;
pub mod report;
pub mod repository;
pub mod routes;
pub mod state;
pub mod validation;
pub mod workflow;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Builds the application under the /catalogo base path.
pub fn app(state: AppState) -> Router {
    let api = routes::create_router()
        .route("/", get(|| async { "Catalogo de productos API" }))
        .route("/health", get(health_check));

    Router::new()
        .nest("/catalogo", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
