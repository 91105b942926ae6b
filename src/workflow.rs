// src/workflow.rs
//
// Catalog editing session. One session mirrors the legacy editor window:
// a form, a Create/Edit mode, a transient image buffer and the listing
// snapshot shown in the table. Handlers translate HTTP calls into the
// same events the window fired (select a row, type into the form, press
// a button) and every mutation runs validate -> build -> repository ->
// refresh -> clear.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::CatalogError;
use crate::image::ensure_supported;
use crate::models::product::Product;
use crate::parse::{format_price, parse_decimal};
use crate::report::{ReportEngine, PARAM_CODIGO, PRODUCT_TEMPLATE};
use crate::repository::ProductRepository;
use crate::validation::validate_product_fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit,
}

impl EditorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EditorMode::Create => "create",
            EditorMode::Edit => "edit",
        }
    }

    pub fn code_editable(&self) -> bool {
        matches!(self, EditorMode::Create)
    }

    pub fn can_create(&self) -> bool {
        matches!(self, EditorMode::Create)
    }

    pub fn can_update(&self) -> bool {
        matches!(self, EditorMode::Edit)
    }
}

/// Form fields exactly as typed. Parsing happens on submit, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub codigo: String,
    pub nombre: String,
    pub precio: String,
    pub disponible: bool,
}

/// Read view of the session handed to the HTTP adapter.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub mode: EditorMode,
    pub form: ProductForm,
    pub image_attached: bool,
    pub productos: Vec<Product>,
}

pub struct CatalogSession {
    repo: Arc<dyn ProductRepository>,
    reports: Arc<dyn ReportEngine>,
    mode: EditorMode,
    form: ProductForm,
    selected: Option<Product>,
    image_buffer: Option<Vec<u8>>,
    productos: Vec<Product>,
    loaded: bool,
}

impl CatalogSession {
    pub fn new(repo: Arc<dyn ProductRepository>, reports: Arc<dyn ReportEngine>) -> Self {
        Self {
            repo,
            reports,
            mode: EditorMode::Create,
            form: ProductForm::default(),
            selected: None,
            image_buffer: None,
            productos: Vec::new(),
            loaded: false,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn state(&self) -> SessionView {
        SessionView {
            mode: self.mode,
            form: self.form.clone(),
            image_attached: self.image_buffer.is_some(),
            productos: self.productos.clone(),
        }
    }

    /// Replaces the form with whatever the client typed. In Edit mode the
    /// code field is locked, so an incoming codigo is ignored there.
    pub fn set_form(&mut self, mut form: ProductForm) {
        if !self.mode.code_editable() {
            form.codigo = self.form.codigo.clone();
        }
        self.form = form;
    }

    /// Reloads the listing snapshot from storage.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> Result<(), CatalogError> {
        self.productos = self.repo.list_all().await?;
        self.loaded = true;
        Ok(())
    }

    /// Loads the snapshot once; later calls are free.
    pub async fn ensure_loaded(&mut self) -> Result<(), CatalogError> {
        if !self.loaded {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Row selection: moves to Edit mode and pre-fills the form from the
    /// row, image bytes included.
    #[instrument(skip(self))]
    pub async fn select(&mut self, codigo: &str) -> Result<(), CatalogError> {
        self.ensure_loaded().await?;
        let Some(product) = self.productos.iter().find(|p| p.codigo == codigo).cloned() else {
            return Err(CatalogError::not_found(format!(
                "product {codigo} is not in the listing"
            )));
        };
        self.form = ProductForm {
            codigo: product.codigo.clone(),
            nombre: product.nombre.clone(),
            precio: format_price(product.precio),
            disponible: product.disponible,
        };
        self.image_buffer = product.imagen.clone();
        self.selected = Some(product);
        self.mode = EditorMode::Edit;
        Ok(())
    }

    /// Drops the selection and blanks the form, back to Create mode.
    pub fn clear(&mut self) {
        self.mode = EditorMode::Create;
        self.form = ProductForm::default();
        self.selected = None;
        self.image_buffer = None;
    }

    /// Outcome of the image picker. Empty bytes mean the pick was
    /// cancelled and the buffer stays as it was.
    pub fn attach_image(&mut self, bytes: Vec<u8>) -> Result<(), CatalogError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let format = ensure_supported(&bytes)?;
        info!(?format, size = bytes.len(), "image attached");
        self.image_buffer = Some(bytes);
        Ok(())
    }

    pub fn clear_image(&mut self) {
        self.image_buffer = None;
    }

    #[instrument(skip(self))]
    pub async fn create(&mut self) -> Result<Product, CatalogError> {
        if !self.mode.can_create() {
            return Err(CatalogError::validation(
                "create is not available while a product is selected",
            ));
        }
        validate_product_fields(&self.form.codigo, &self.form.nombre, &self.form.precio)?;
        let product = Product {
            codigo: self.form.codigo.trim().to_string(),
            nombre: self.form.nombre.trim().to_string(),
            precio: parse_decimal(&self.form.precio)?,
            disponible: self.form.disponible,
            imagen: self.image_buffer.clone(),
        };
        self.repo.create(&product).await?;
        info!(codigo = %product.codigo, "product created");
        self.refresh().await?;
        self.clear();
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn update(&mut self) -> Result<Product, CatalogError> {
        let Some(selected) = self.selected.clone() else {
            return Err(CatalogError::validation("no product is selected"));
        };
        // Business rule, checked before field validation: a stored image
        // cannot be blanked on update.
        if selected.has_image() && self.image_buffer.is_none() {
            return Err(CatalogError::validation(
                "cannot blank a previously-set image",
            ));
        }
        validate_product_fields(&self.form.codigo, &self.form.nombre, &self.form.precio)?;
        let product = Product {
            // codigo comes from the selection, never from the form.
            codigo: selected.codigo.clone(),
            nombre: self.form.nombre.trim().to_string(),
            precio: parse_decimal(&self.form.precio)?,
            disponible: self.form.disponible,
            imagen: self.image_buffer.clone(),
        };
        self.repo.update(&product).await?;
        info!(codigo = %product.codigo, "product updated");
        self.refresh().await?;
        self.clear();
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete(&mut self) -> Result<(), CatalogError> {
        let Some(selected) = self.selected.clone() else {
            return Err(CatalogError::validation("no product is selected"));
        };
        self.repo.delete(&selected).await?;
        info!(codigo = %selected.codigo, "product deleted");
        self.refresh().await?;
        self.clear();
        Ok(())
    }

    /// Renders the product sheet for the selection. Render failures are
    /// logged and swallowed; only a missing selection is an error.
    #[instrument(skip(self))]
    pub async fn report(&self) -> Result<(), CatalogError> {
        let Some(selected) = &self.selected else {
            return Err(CatalogError::validation("no product is selected"));
        };
        let mut params = HashMap::new();
        params.insert(PARAM_CODIGO.to_string(), selected.codigo.clone());
        match self.reports.render(PRODUCT_TEMPLATE, &params).await {
            Ok(_) => info!(codigo = %selected.codigo, "report generated"),
            Err(e) => warn!(codigo = %selected.codigo, error = %e, "report generation failed"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::MockReportEngine;
    use crate::repository::MockProductRepository;
    use mockall::Sequence;

    const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nrest-of-file";

    fn widget() -> Product {
        Product {
            codigo: "AB123".to_string(),
            nombre: "Widget".to_string(),
            precio: 12.5,
            disponible: true,
            imagen: None,
        }
    }

    fn widget_with_image() -> Product {
        Product {
            imagen: Some(PNG_BYTES.to_vec()),
            ..widget()
        }
    }

    fn filled_form() -> ProductForm {
        ProductForm {
            codigo: "AB123".to_string(),
            nombre: "Widget".to_string(),
            precio: "12,50".to_string(),
            disponible: true,
        }
    }

    fn session_with(repo: MockProductRepository) -> CatalogSession {
        CatalogSession::new(Arc::new(repo), Arc::new(MockReportEngine::new()))
    }

    #[tokio::test]
    async fn valid_create_persists_then_refreshes_and_clears() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .withf(|p: &Product| {
                p.codigo == "AB123"
                    && p.nombre == "Widget"
                    && (p.precio - 12.5).abs() < f64::EPSILON
                    && p.disponible
                    && p.imagen.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_list_all()
            .times(1)
            .returning(|| Ok(vec![widget()]));

        let mut session = session_with(repo);
        session.set_form(filled_form());
        let created = session.create().await.unwrap();

        assert_eq!(created.codigo, "AB123");
        let view = session.state();
        assert_eq!(view.mode, EditorMode::Create);
        assert_eq!(view.form, ProductForm::default());
        assert_eq!(view.productos.len(), 1);
    }

    #[tokio::test]
    async fn invalid_code_never_reaches_the_repository() {
        let mut session = session_with(MockProductRepository::new());
        session.set_form(ProductForm {
            codigo: "AB1".to_string(),
            ..filled_form()
        });

        let err = session.create().await.unwrap_err();
        match err {
            CatalogError::Validation(msg) => assert!(msg.contains("codigo")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn select_prefills_the_form_and_locks_the_code() {
        let mut repo = MockProductRepository::new();
        repo.expect_list_all()
            .times(1)
            .returning(|| Ok(vec![widget_with_image()]));

        let mut session = session_with(repo);
        session.select("AB123").await.unwrap();

        let view = session.state();
        assert_eq!(view.mode, EditorMode::Edit);
        assert_eq!(view.form.codigo, "AB123");
        assert_eq!(view.form.precio, "12.50");
        assert!(view.image_attached);

        session.set_form(ProductForm {
            codigo: "ZZ999".to_string(),
            ..filled_form()
        });
        assert_eq!(session.form().codigo, "AB123");
    }

    #[tokio::test]
    async fn selecting_an_unknown_code_leaves_the_session_alone() {
        let mut repo = MockProductRepository::new();
        repo.expect_list_all().times(1).returning(|| Ok(vec![]));

        let mut session = session_with(repo);
        let err = session.select("AB123").await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
        assert_eq!(session.mode(), EditorMode::Create);
    }

    #[tokio::test]
    async fn image_guard_rejects_update_before_any_repository_call() {
        let mut repo = MockProductRepository::new();
        repo.expect_list_all()
            .times(1)
            .returning(|| Ok(vec![widget_with_image()]));

        let mut session = session_with(repo);
        session.select("AB123").await.unwrap();
        session.clear_image();

        let err = session.update().await.unwrap_err();
        match err {
            CatalogError::Validation(msg) => assert!(msg.contains("image")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(session.mode(), EditorMode::Edit);
    }

    #[tokio::test]
    async fn update_keeps_the_selected_code_and_returns_to_create_mode() {
        let mut repo = MockProductRepository::new();
        let mut seq = Sequence::new();
        repo.expect_list_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![widget_with_image()]));
        repo.expect_update()
            .withf(|p: &Product| {
                p.codigo == "AB123"
                    && p.nombre == "Widget XL"
                    && (p.precio - 99.9).abs() < f64::EPSILON
                    && p.imagen.is_some()
            })
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_list_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![widget_with_image()]));

        let mut session = session_with(repo);
        session.select("AB123").await.unwrap();
        session.set_form(ProductForm {
            codigo: "AB123".to_string(),
            nombre: "Widget XL".to_string(),
            precio: "99.9".to_string(),
            disponible: true,
        });
        session.update().await.unwrap();

        let view = session.state();
        assert_eq!(view.mode, EditorMode::Create);
        assert_eq!(view.form, ProductForm::default());
        assert!(!view.image_attached);
    }

    #[tokio::test]
    async fn update_without_a_selection_is_rejected() {
        let mut session = session_with(MockProductRepository::new());
        session.set_form(filled_form());
        assert!(matches!(
            session.update().await,
            Err(CatalogError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn delete_removes_the_selection_and_refreshes() {
        let mut repo = MockProductRepository::new();
        let mut seq = Sequence::new();
        repo.expect_list_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![widget()]));
        repo.expect_delete()
            .withf(|p: &Product| p.codigo == "AB123")
            .times(1)
            .returning(|_| Ok(()));
        repo.expect_list_all()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(vec![]));

        let mut session = session_with(repo);
        session.select("AB123").await.unwrap();
        session.delete().await.unwrap();

        let view = session.state();
        assert_eq!(view.mode, EditorMode::Create);
        assert!(view.productos.is_empty());
    }

    #[tokio::test]
    async fn delete_without_a_selection_is_rejected() {
        let mut session = session_with(MockProductRepository::new());
        assert!(matches!(
            session.delete().await,
            Err(CatalogError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn attach_image_rejects_unknown_bytes_and_keeps_the_buffer() {
        let mut session = session_with(MockProductRepository::new());
        assert!(session.attach_image(b"GIF89a...".to_vec()).is_err());
        assert!(!session.state().image_attached);

        session.attach_image(PNG_BYTES.to_vec()).unwrap();
        assert!(session.state().image_attached);

        // Cancelled pick: empty bytes leave the buffer as it was.
        session.attach_image(Vec::new()).unwrap();
        assert!(session.state().image_attached);
    }

    #[tokio::test]
    async fn report_is_fire_and_forget_over_the_selection() {
        let mut repo = MockProductRepository::new();
        repo.expect_list_all()
            .times(1)
            .returning(|| Ok(vec![widget()]));
        let mut engine = MockReportEngine::new();
        engine
            .expect_render()
            .withf(|template, params| {
                template == PRODUCT_TEMPLATE
                    && params.get(PARAM_CODIGO).map(String::as_str) == Some("AB123")
            })
            .times(1)
            .returning(|_, _| Err(CatalogError::report("renderer offline")));

        let mut session = CatalogSession::new(Arc::new(repo), Arc::new(engine));
        session.select("AB123").await.unwrap();

        // Render failure is swallowed and the session state survives.
        session.report().await.unwrap();
        assert_eq!(session.mode(), EditorMode::Edit);
        assert_eq!(session.form().codigo, "AB123");
    }

    #[tokio::test]
    async fn report_without_a_selection_is_rejected() {
        let session = session_with(MockProductRepository::new());
        assert!(matches!(
            session.report().await,
            Err(CatalogError::Validation(_))
        ));
    }
}
