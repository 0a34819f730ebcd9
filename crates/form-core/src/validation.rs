//! Validación de campos, pasos y formulario completo.
//!
//! Reglas aplicadas:
//! - obligatoriedad (fija o condicional) sobre valores "en blanco";
//! - chequeo de tipo según `FieldKind` y restricciones (regex, cotas,
//!   conjunto de opciones);
//! - reglas cruzadas, adjuntando el error al campo designado.
//!
//! Los campos de pasos invisibles quedan siempre fuera: un paso oculto no
//! puede bloquear ni un avance ni el submit final.
use indexmap::IndexMap;
use serde_json::Value;

use form_domain::{FieldKind, FieldSchema, FormValues, StepDefinition, WizardDefinition};

/// Errores de validación por campo, en orden de aparición.
pub type ValidationErrors = IndexMap<String, Vec<String>>;

fn push_error(errors: &mut ValidationErrors, key: &str, message: String) {
    errors.entry(key.to_string()).or_default().push(message);
}

/// Valida un campo individual contra los valores actuales.
pub fn validate_field(field: &FieldSchema, values: &FormValues) -> Vec<String> {
    let mut out = Vec::new();

    if values.is_blank(field.key()) {
        if field.is_required(values) {
            out.push(format!("'{}' is required", field.label()));
        }
        // Un campo en blanco y no obligatorio no se sigue validando
        return out;
    }

    let value = match values.get(field.key()) {
        Some(v) => v,
        None => return out,
    };
    let constraints = field.constraints();

    match field.kind() {
        FieldKind::String => match value {
            Value::String(s) => {
                if let Some(re) = &constraints.pattern {
                    if !re.is_match(s) {
                        out.push(format!("'{}' has an invalid format", field.label()));
                    }
                }
            }
            _ => out.push(format!("'{}' must be a string", field.label())),
        },
        FieldKind::Number => match value.as_f64() {
            Some(n) => {
                if let Some(min) = constraints.min {
                    if n < min {
                        out.push(format!("'{}' must be at least {}", field.label(), min));
                    }
                }
                if let Some(max) = constraints.max {
                    if n > max {
                        out.push(format!("'{}' must be at most {}", field.label(), max));
                    }
                }
            }
            None => out.push(format!("'{}' must be a number", field.label())),
        },
        FieldKind::Boolean => {
            if !value.is_boolean() {
                out.push(format!("'{}' must be a boolean", field.label()));
            }
        }
        FieldKind::Enum => match value {
            Value::String(s) if constraints.options.iter().any(|o| o == s) => {}
            Value::String(_) => out.push(format!("'{}' is not an allowed option", field.label())),
            _ => out.push(format!("'{}' must be one of the allowed options", field.label())),
        },
        FieldKind::MultiEnum => match value {
            Value::Array(items) => {
                let all_known = items.iter().all(|i| match i {
                    Value::String(s) => constraints.options.iter().any(|o| o == s),
                    _ => false,
                });
                if !all_known {
                    out.push(format!("'{}' contains values outside the allowed options", field.label()));
                }
            }
            _ => out.push(format!("'{}' must be a list of options", field.label())),
        },
        FieldKind::Date => match value {
            Value::String(s) if FieldKind::parse_date(s).is_some() => {}
            _ => out.push(format!("'{}' must be a date (YYYY-MM-DD)", field.label())),
        },
    }

    out
}

/// Valida los campos de un paso más las reglas cruzadas cuyo campo afectado
/// pertenece a ese paso. El paso se asume visible (el llamador filtra).
pub fn validate_step(wizard: &WizardDefinition, step: &StepDefinition, values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in step.fields() {
        for message in validate_field(field, values) {
            push_error(&mut errors, field.key(), message);
        }
    }
    for rule in wizard.rules() {
        if step.has_field(rule.field()) && !rule.is_satisfied(values) {
            push_error(&mut errors, rule.field(), rule.message().to_string());
        }
    }
    errors
}

/// Valida el formulario completo: todos los campos de pasos visibles más
/// todas las reglas cruzadas cuyo campo afectado vive en un paso visible.
pub fn validate_all(wizard: &WizardDefinition, values: &FormValues) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for step in wizard.steps().iter().filter(|s| s.is_visible(values)) {
        for field in step.fields() {
            for message in validate_field(field, values) {
                push_error(&mut errors, field.key(), message);
            }
        }
    }
    for rule in wizard.rules() {
        let owner_visible = wizard.step_index_of_field(rule.field())
                                  .map(|i| wizard.steps()[i].is_visible(values))
                                  .unwrap_or(false);
        if owner_visible && !rule.is_satisfied(values) {
            push_error(&mut errors, rule.field(), rule.message().to_string());
        }
    }
    errors
}
