//! Definición de un paso del wizard.
//!
//! Un paso agrupa campos en orden y lleva un predicado de visibilidad. Un
//! paso invisible se salta en la navegación y sus campos no se validan ni
//! se incluyen en el payload final.
use std::sync::Arc;

use crate::field::FieldSchema;
use crate::rules::Predicate;
use crate::value::FormValues;

pub struct StepDefinition {
    id: String,
    title: String,
    description: Option<String>,
    fields: Vec<FieldSchema>,
    visible: Predicate,
}

impl StepDefinition {
    /// Crea un paso siempre visible y sin campos.
    pub fn new(id: &str, title: &str) -> Self {
        Self { id: id.to_string(),
               title: title.to_string(),
               description: None,
               fields: Vec::new(),
               visible: Arc::new(|_| true) }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Añade un campo al final del paso.
    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Condiciona la visibilidad del paso a valores previos.
    pub fn visible_when<F>(mut self, predicate: F) -> Self
        where F: Fn(&FormValues) -> bool + Send + Sync + 'static
    {
        self.visible = Arc::new(predicate);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field_keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.key())
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key() == key)
    }

    /// Evalúa el predicado de visibilidad contra los valores actuales.
    pub fn is_visible(&self, values: &FormValues) -> bool {
        (self.visible)(values)
    }
}

impl std::fmt::Debug for StepDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepDefinition")
         .field("id", &self.id)
         .field("title", &self.title)
         .field("description", &self.description)
         .field("fields", &self.fields)
         .field("visible", &"<predicate>")
         .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use serde_json::json;

    #[test]
    fn visibility_depends_on_prior_answers() {
        let step = StepDefinition::new("financing", "Financing")
            .field(FieldSchema::new("financing_type", "Financing type", FieldKind::Enum))
            .visible_when(|v| matches!(v.str("intent"), Some("BUY") | Some("INVEST")));

        let mut values = FormValues::new();
        assert!(!step.is_visible(&values));
        values.set("intent", json!("BUY"));
        assert!(step.is_visible(&values));
        values.set("intent", json!("SELL"));
        assert!(!step.is_visible(&values));
    }
}
