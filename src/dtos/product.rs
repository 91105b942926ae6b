// src/dtos/product.rs
use serde::{Deserialize, Serialize};

use crate::models::product::Product;
use crate::workflow::{ProductForm, SessionView};

/// Form submission, fields exactly as typed. Every field defaults so a
/// partial body still reaches the validator and gets the aggregated
/// error list instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ProductFormRequest {
    #[serde(default)]
    pub codigo: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub precio: String,
    #[serde(default)]
    pub disponible: bool,
}

impl From<ProductFormRequest> for ProductForm {
    fn from(req: ProductFormRequest) -> Self {
        Self {
            codigo: req.codigo,
            nombre: req.nombre,
            precio: req.precio,
            disponible: req.disponible,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub codigo: String,
    pub nombre: String,
    pub precio: f64,
    pub disponible: bool,
    pub tiene_imagen: bool,
}

// Convert from Model to Response DTO; image bytes never travel in listings
impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            codigo: product.codigo.clone(),
            nombre: product.nombre.clone(),
            precio: product.precio,
            disponible: product.disponible,
            tiene_imagen: product.has_image(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductFormResponse {
    pub codigo: String,
    pub nombre: String,
    pub precio: String,
    pub disponible: bool,
}

impl From<&ProductForm> for ProductFormResponse {
    fn from(form: &ProductForm) -> Self {
        Self {
            codigo: form.codigo.clone(),
            nombre: form.nombre.clone(),
            precio: form.precio.clone(),
            disponible: form.disponible,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub mode: &'static str,
    pub code_editable: bool,
    pub can_create: bool,
    pub can_update: bool,
    pub form: ProductFormResponse,
    pub image_attached: bool,
    pub productos: Vec<ProductResponse>,
}

impl From<SessionView> for SessionResponse {
    fn from(view: SessionView) -> Self {
        Self {
            mode: view.mode.as_str(),
            code_editable: view.mode.code_editable(),
            can_create: view.mode.can_create(),
            can_update: view.mode.can_update(),
            form: ProductFormResponse::from(&view.form),
            image_attached: view.image_attached,
            productos: view.productos.iter().map(ProductResponse::from).collect(),
        }
    }
}
