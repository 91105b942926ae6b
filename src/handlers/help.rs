// src/handlers/help.rs
use axum::{
    extract::Path,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use tracing::instrument;

use crate::dtos::help::HelpTopicResponse;
use crate::error::CatalogError;
use crate::help::{find_topic, help_index, HelpContent};

// GET /ayuda - Help topic tree
#[instrument]
pub async fn get_help_index() -> Json<Vec<HelpTopicResponse>> {
    let topics = help_index().iter().map(HelpTopicResponse::from).collect();
    Json(topics)
}

// GET /ayuda/{id} - Topic content, local page or remote redirect
#[instrument]
pub async fn get_help_topic(Path(id): Path<String>) -> Result<Response, CatalogError> {
    let topic = find_topic(&id)
        .ok_or_else(|| CatalogError::not_found(format!("help topic {id} does not exist")))?;
    let response = match topic.content {
        HelpContent::Local(body) => Html(body).into_response(),
        HelpContent::Remote(url) => Redirect::temporary(url).into_response(),
    };
    Ok(response)
}
