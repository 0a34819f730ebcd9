//! Definición inmutable de un wizard completo.
//!
//! Una `WizardDefinition` es la lista ordenada de pasos más las reglas
//! cruzadas. Es datos, no código: el host la construye por tipo de entidad
//! (cliente, propiedad) y el motor de sesión la consume sin conocer el
//! dominio concreto.
use crate::error::DomainError;
use crate::field::{FieldKind, FieldSchema};
use crate::rules::CrossFieldRule;
use crate::step::StepDefinition;
use crate::value::FormValues;

#[derive(Debug)]
pub struct WizardDefinition {
    entity_kind: String,
    steps: Vec<StepDefinition>,
    rules: Vec<CrossFieldRule>,
}

impl WizardDefinition {
    pub fn builder(entity_kind: &str) -> WizardBuilder {
        WizardBuilder { entity_kind: entity_kind.to_string(),
                        steps: Vec::new(),
                        rules: Vec::new() }
    }

    /// Tipo de entidad que produce el wizard (clave para el backend).
    pub fn entity_kind(&self) -> &str {
        &self.entity_kind
    }

    pub fn steps(&self) -> &[StepDefinition] {
        &self.steps
    }

    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Busca el esquema de un campo por clave.
    pub fn field(&self, key: &str) -> Option<&FieldSchema> {
        self.steps.iter().flat_map(|s| s.fields().iter()).find(|f| f.key() == key)
    }

    /// Índice (en la lista completa de pasos) del paso dueño de un campo.
    pub fn step_index_of_field(&self, key: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.has_field(key))
    }

    /// Valores iniciales: cada campo con default declarado.
    pub fn seed_values(&self) -> FormValues {
        let mut values = FormValues::new();
        for step in &self.steps {
            for field in step.fields() {
                if let Some(default) = field.default() {
                    values.set(field.key(), default.clone());
                }
            }
        }
        values
    }
}

/// Builder con verificación de consistencia al cerrar.
pub struct WizardBuilder {
    entity_kind: String,
    steps: Vec<StepDefinition>,
    rules: Vec<CrossFieldRule>,
}

impl WizardBuilder {
    pub fn step(mut self, step: StepDefinition) -> Self {
        self.steps.push(step);
        self
    }

    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Cierra la definición. Invariantes verificadas:
    /// - claves de campo únicas a través de todos los pasos;
    /// - Enum/MultiEnum declaran su conjunto de opciones;
    /// - toda regla cruzada apunta a un campo existente.
    pub fn build(self) -> Result<WizardDefinition, DomainError> {
        if self.steps.is_empty() {
            return Err(DomainError::InvalidSchema("wizard has no steps".into()));
        }

        let mut seen: Vec<&str> = Vec::new();
        for step in &self.steps {
            for field in step.fields() {
                if seen.contains(&field.key()) {
                    return Err(DomainError::DuplicateFieldKey(field.key().to_string()));
                }
                seen.push(field.key());

                if matches!(field.kind(), FieldKind::Enum | FieldKind::MultiEnum)
                   && field.constraints().options.is_empty()
                {
                    return Err(DomainError::InvalidSchema(format!("field '{}' is {} but declares no options",
                                                                  field.key(),
                                                                  field.kind().label())));
                }
            }
        }

        for rule in &self.rules {
            if !seen.contains(&rule.field()) {
                return Err(DomainError::UnknownFieldKey(rule.field().to_string()));
            }
        }

        Ok(WizardDefinition { entity_kind: self.entity_kind,
                              steps: self.steps,
                              rules: self.rules })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use serde_json::json;

    fn base_step(id: &str, key: &str) -> StepDefinition {
        StepDefinition::new(id, id).field(FieldSchema::new(key, key, FieldKind::String))
    }

    #[test]
    fn duplicate_keys_are_rejected_across_steps() {
        let err = WizardDefinition::builder("client").step(base_step("one", "name"))
                                                    .step(base_step("two", "name"))
                                                    .build()
                                                    .unwrap_err();
        assert_eq!(err, DomainError::DuplicateFieldKey("name".into()));
    }

    #[test]
    fn enum_without_options_is_rejected() {
        let step = StepDefinition::new("s", "s").field(FieldSchema::new("intent", "Intent", FieldKind::Enum));
        let err = WizardDefinition::builder("client").step(step).build().unwrap_err();
        assert!(matches!(err, DomainError::InvalidSchema(_)));
    }

    #[test]
    fn rule_must_reference_known_field() {
        let err = WizardDefinition::builder("client")
            .step(base_step("one", "name"))
            .rule(CrossFieldRule::new("ghost", "nope", |_| true))
            .build()
            .unwrap_err();
        assert_eq!(err, DomainError::UnknownFieldKey("ghost".into()));
    }

    #[test]
    fn seed_values_collect_defaults_only() {
        let step = StepDefinition::new("s", "s")
            .field(FieldSchema::new("name", "Name", FieldKind::String))
            .field(FieldSchema::new("newsletter", "Newsletter", FieldKind::Boolean).with_default(json!(false)));
        let wizard = WizardDefinition::builder("client").step(step).build().unwrap();

        let seed = wizard.seed_values();
        assert_eq!(seed.len(), 1);
        assert_eq!(seed.get("newsletter"), Some(&json!(false)));
    }

    #[test]
    fn field_lookup_spans_all_steps() {
        let wizard = WizardDefinition::builder("client").step(base_step("one", "name"))
                                                       .step(base_step("two", "email"))
                                                       .build()
                                                       .unwrap();
        assert!(wizard.field("email").is_some());
        assert_eq!(wizard.step_index_of_field("email"), Some(1));
        assert_eq!(wizard.step_index_of_field("ghost"), None);
    }
}
