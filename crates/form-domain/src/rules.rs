//! Predicados y reglas cruzadas.
//!
//! Las condiciones de visibilidad y de obligatoriedad condicional se modelan
//! como predicados puros sobre `FormValues`, evaluables sin capa de
//! presentación. Una `CrossFieldRule` es una restricción cuya verdad depende
//! de más de un campo; su error se adjunta a un campo designado.
use std::sync::Arc;

use crate::value::FormValues;

/// Predicado puro sobre los valores actuales del formulario.
pub type Predicate = Arc<dyn Fn(&FormValues) -> bool + Send + Sync>;

/// Regla de validación que cruza varios campos (p. ej. "email o teléfono").
///
/// `check` devuelve `true` cuando la regla se cumple. Se evalúa en el submit
/// final y, para las reglas cuyo campo afectado pertenece al paso actual,
/// también en la validación por paso.
pub struct CrossFieldRule {
    field: String,
    message: String,
    check: Predicate,
}

impl CrossFieldRule {
    pub fn new<F>(field: &str, message: &str, check: F) -> Self
        where F: Fn(&FormValues) -> bool + Send + Sync + 'static
    {
        Self { field: field.to_string(),
               message: message.to_string(),
               check: Arc::new(check) }
    }

    /// Campo al que se adjunta el error cuando la regla falla.
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_satisfied(&self, values: &FormValues) -> bool {
        (self.check)(values)
    }
}

impl std::fmt::Debug for CrossFieldRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrossFieldRule")
         .field("field", &self.field)
         .field("message", &self.message)
         .field("check", &"<predicate>")
         .finish()
    }
}
