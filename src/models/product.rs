use std::fmt;
use std::hash::{Hash, Hasher};

use sqlx::FromRow;

/// A row of the `productos` table. Field names follow the legacy columns.
///
/// Instances are transient: built from the form for one write, or mapped
/// from a row for one read. The `codigo` is the identity (two products
/// are equal iff their codes are equal) and is never rewritten once the
/// row exists.
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub codigo: String,
    pub nombre: String,
    pub precio: f64,
    pub disponible: bool,
    pub imagen: Option<Vec<u8>>,
}

impl Product {
    pub fn has_image(&self) -> bool {
        self.imagen.is_some()
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.codigo == other.codigo
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.codigo.hash(state);
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.nombre)
    }
}
