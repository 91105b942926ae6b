// src/report.rs
//
// Reporting collaborator. The legacy app handed a template id and a
// parameter map ({"codigoproducto": <code>}) to JasperReports and let it
// fetch its own data; the shape survives here as a trait so the catalog
// can stay indifferent to how reports are produced. The bundled engine
// renders a plain-text product sheet.

use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::CatalogError;
use crate::repository::ProductRepository;

/// Template id of the single-product sheet.
pub const PRODUCT_TEMPLATE: &str = "producto";

/// Parameter carrying the product code, name kept from the legacy report.
pub const PARAM_CODIGO: &str = "codigoproducto";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportEngine: Send + Sync {
    /// Produce the formatted report for `template` with the given named
    /// parameters.
    async fn render(
        &self,
        template: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, CatalogError>;
}

/// Text renderer backed by the product repository. Like the legacy
/// engine it resolves its own data from the parameters it is given.
pub struct TextReportEngine {
    repo: Arc<dyn ProductRepository>,
}

impl TextReportEngine {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl ReportEngine for TextReportEngine {
    async fn render(
        &self,
        template: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, CatalogError> {
        if template != PRODUCT_TEMPLATE {
            return Err(CatalogError::report(format!(
                "unknown report template: {template}"
            )));
        }

        let codigo = params
            .get(PARAM_CODIGO)
            .ok_or_else(|| CatalogError::report(format!("missing parameter {PARAM_CODIGO}")))?;

        let product = self
            .repo
            .find_by_code(codigo)
            .await?
            .ok_or_else(|| CatalogError::not_found(format!("product {codigo} does not exist")))?;

        let mut out = String::new();
        let _ = writeln!(out, "Informe de producto");
        let _ = writeln!(out, "generated at {}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"));
        let _ = writeln!(out);
        let _ = writeln!(out, "codigo:     {}", product.codigo);
        let _ = writeln!(out, "nombre:     {}", product.nombre);
        let _ = writeln!(out, "precio:     {}", crate::parse::format_price(product.precio));
        let _ = writeln!(out, "disponible: {}", if product.disponible { "yes" } else { "no" });
        match &product.imagen {
            Some(bytes) => {
                let _ = writeln!(out, "imagen:     {} bytes", bytes.len());
            }
            None => {
                let _ = writeln!(out, "imagen:     none");
            }
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Product;
    use crate::repository::MockProductRepository;

    fn engine_with(product: Option<Product>) -> TextReportEngine {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_code()
            .returning(move |_| Ok(product.clone()));
        TextReportEngine::new(Arc::new(repo))
    }

    fn widget() -> Product {
        Product {
            codigo: "AB123".to_string(),
            nombre: "Widget".to_string(),
            precio: 12.5,
            disponible: true,
            imagen: Some(vec![1, 2, 3]),
        }
    }

    fn codigo_params(codigo: &str) -> HashMap<String, String> {
        HashMap::from([(PARAM_CODIGO.to_string(), codigo.to_string())])
    }

    #[tokio::test]
    async fn renders_the_product_sheet() {
        let report = engine_with(Some(widget()))
            .render(PRODUCT_TEMPLATE, &codigo_params("AB123"))
            .await
            .unwrap();
        assert!(report.contains("codigo:     AB123"));
        assert!(report.contains("nombre:     Widget"));
        assert!(report.contains("precio:     12.50"));
        assert!(report.contains("disponible: yes"));
        assert!(report.contains("imagen:     3 bytes"));
    }

    #[tokio::test]
    async fn unknown_template_is_a_report_error() {
        let err = engine_with(Some(widget()))
            .render("ventas", &codigo_params("AB123"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Report(_)));
    }

    #[tokio::test]
    async fn missing_parameter_is_a_report_error() {
        let err = engine_with(Some(widget()))
            .render(PRODUCT_TEMPLATE, &HashMap::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("codigoproducto"));
    }

    #[tokio::test]
    async fn unknown_product_is_not_found() {
        let err = engine_with(None)
            .render(PRODUCT_TEMPLATE, &codigo_params("ZZ999"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }
}
