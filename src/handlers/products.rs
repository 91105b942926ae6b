// src/handlers/products.rs
use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use crate::dtos::product::{ProductFormRequest, ProductResponse, SessionResponse};
use crate::error::CatalogError;
use crate::report::{PARAM_CODIGO, PRODUCT_TEMPLATE};
use crate::state::AppState;

// GET /productos - List all products
#[instrument(skip(state))]
pub async fn get_productos(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, CatalogError> {
    let mut session = state.session.lock().await;
    session.ensure_loaded().await?;
    let response = session
        .state()
        .productos
        .iter()
        .map(ProductResponse::from)
        .collect();
    Ok(Json(response))
}

// GET /productos/{codigo} - Get single product
#[instrument(skip(state))]
pub async fn get_producto(
    Path(codigo): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, CatalogError> {
    let product = state
        .repo
        .find_by_code(&codigo)
        .await?
        .ok_or_else(|| CatalogError::not_found(format!("product {codigo} does not exist")))?;
    Ok(Json(ProductResponse::from(&product)))
}

// POST /productos - Submit a fresh form and create the product
#[instrument(skip(state, payload))]
pub async fn create_producto(
    State(state): State<AppState>,
    Json(payload): Json<ProductFormRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), CatalogError> {
    let mut session = state.session.lock().await;
    // Stateless submit: the editor is reset first, so any in-flight
    // selection or buffered image is dropped.
    session.clear();
    session.set_form(payload.into());
    let product = session.create().await?;
    Ok((StatusCode::CREATED, Json(ProductResponse::from(&product))))
}

// PUT /productos/{codigo} - Select the row, merge the form, update
#[instrument(skip(state, payload))]
pub async fn update_producto(
    Path(codigo): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ProductFormRequest>,
) -> Result<Json<ProductResponse>, CatalogError> {
    let mut session = state.session.lock().await;
    session.clear();
    session.select(&codigo).await?;
    session.set_form(payload.into());
    let product = session.update().await?;
    Ok(Json(ProductResponse::from(&product)))
}

// DELETE /productos/{codigo} - Select the row and delete it
#[instrument(skip(state))]
pub async fn delete_producto(
    Path(codigo): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<()>, CatalogError> {
    let mut session = state.session.lock().await;
    session.clear();
    session.select(&codigo).await?;
    session.delete().await?;
    Ok(Json(()))
}

// GET /productos/{codigo}/informe - Render the product sheet
#[instrument(skip(state))]
pub async fn get_informe(
    Path(codigo): Path<String>,
    State(state): State<AppState>,
) -> Result<String, CatalogError> {
    let mut params = HashMap::new();
    params.insert(PARAM_CODIGO.to_string(), codigo);
    let sheet = state.reports.render(PRODUCT_TEMPLATE, &params).await?;
    Ok(sheet)
}

// GET /session - Current editor state
#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, CatalogError> {
    let mut session = state.session.lock().await;
    session.ensure_loaded().await?;
    Ok(Json(SessionResponse::from(session.state())))
}

// POST /session/select/{codigo} - Row selection, moves to Edit mode
#[instrument(skip(state))]
pub async fn select_session(
    Path(codigo): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, CatalogError> {
    let mut session = state.session.lock().await;
    session.select(&codigo).await?;
    Ok(Json(SessionResponse::from(session.state())))
}

// POST /session/clear - Back to Create mode with a blank form
#[instrument(skip(state))]
pub async fn clear_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, CatalogError> {
    let mut session = state.session.lock().await;
    session.clear();
    Ok(Json(SessionResponse::from(session.state())))
}

// PUT /session/form - Replace the form fields
#[instrument(skip(state, payload))]
pub async fn set_session_form(
    State(state): State<AppState>,
    Json(payload): Json<ProductFormRequest>,
) -> Result<Json<SessionResponse>, CatalogError> {
    let mut session = state.session.lock().await;
    session.set_form(payload.into());
    Ok(Json(SessionResponse::from(session.state())))
}

// PUT /session/imagen - Attach picked image bytes
#[instrument(skip(state, body))]
pub async fn attach_session_image(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SessionResponse>, CatalogError> {
    let mut session = state.session.lock().await;
    session.attach_image(body.to_vec())?;
    Ok(Json(SessionResponse::from(session.state())))
}

// DELETE /session/imagen - Drop the buffered image
#[instrument(skip(state))]
pub async fn clear_session_image(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, CatalogError> {
    let mut session = state.session.lock().await;
    session.clear_image();
    Ok(Json(SessionResponse::from(session.state())))
}

// POST /session/create - Submit the session form as a new product
#[instrument(skip(state))]
pub async fn create_from_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionResponse>), CatalogError> {
    let mut session = state.session.lock().await;
    session.create().await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(session.state()))))
}

// POST /session/update - Submit the session form over the selection
#[instrument(skip(state))]
pub async fn update_from_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, CatalogError> {
    let mut session = state.session.lock().await;
    session.update().await?;
    Ok(Json(SessionResponse::from(session.state())))
}

// DELETE /session/selection - Delete the selected product
#[instrument(skip(state))]
pub async fn delete_session_selection(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, CatalogError> {
    let mut session = state.session.lock().await;
    session.delete().await?;
    Ok(Json(SessionResponse::from(session.state())))
}

// POST /session/report - Fire-and-forget product sheet for the selection
#[instrument(skip(state))]
pub async fn report_session(
    State(state): State<AppState>,
) -> Result<Json<SessionResponse>, CatalogError> {
    let session = state.session.lock().await;
    session.report().await?;
    Ok(Json(SessionResponse::from(session.state())))
}
