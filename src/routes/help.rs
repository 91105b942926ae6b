use axum::{routing::get, Router};

use crate::handlers::help::{get_help_index, get_help_topic};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ayuda", get(get_help_index))
        .route("/ayuda/{id}", get(get_help_topic))
}
