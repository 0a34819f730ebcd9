//! Esquema declarativo de un campo de formulario.
//!
//! Un `FieldSchema` describe tipo, restricciones y valor por defecto de un
//! input. Es inmutable: se define al construir el wizard y nunca cambia en
//! tiempo de sesión. La obligatoriedad puede ser condicional (predicado
//! sobre los valores previos), igual que la visibilidad de los pasos.
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use crate::error::DomainError;
use crate::rules::Predicate;
use crate::value::FormValues;

/// Tipo general del campo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Texto libre.
    String,
    /// Numérico (entero o decimal).
    Number,
    /// Booleano.
    Boolean,
    /// Opción única dentro de un conjunto cerrado.
    Enum,
    /// Varias opciones dentro de un conjunto cerrado.
    MultiEnum,
    /// Fecha ISO-8601 (`YYYY-MM-DD`).
    Date,
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Enum => "enum",
            FieldKind::MultiEnum => "multi-enum",
            FieldKind::Date => "date",
        }
    }

    /// Parsea el único formato de fecha aceptado para `Date` (`YYYY-MM-DD`).
    pub fn parse_date(input: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
    }
}

/// Restricciones opcionales de un campo.
#[derive(Debug, Clone, Default)]
pub struct FieldConstraints {
    /// Expresión regular que debe satisfacer un valor string.
    pub pattern: Option<Regex>,
    /// Cota inferior para valores numéricos.
    pub min: Option<f64>,
    /// Cota superior para valores numéricos.
    pub max: Option<f64>,
    /// Conjunto cerrado de opciones (Enum / MultiEnum).
    pub options: Vec<String>,
}

/// Obligatoriedad de un campo: fija o condicionada a valores previos.
#[derive(Clone)]
pub enum RequiredRule {
    Always,
    Never,
    When(Predicate),
}

impl fmt::Debug for RequiredRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredRule::Always => write!(f, "Always"),
            RequiredRule::Never => write!(f, "Never"),
            RequiredRule::When(_) => write!(f, "When(<predicate>)"),
        }
    }
}

/// Descripción inmutable de un input del wizard.
#[derive(Debug)]
pub struct FieldSchema {
    key: String,
    label: String,
    kind: FieldKind,
    required: RequiredRule,
    constraints: FieldConstraints,
    default: Option<Value>,
}

impl FieldSchema {
    pub fn new(key: &str, label: &str, kind: FieldKind) -> Self {
        Self { key: key.to_string(),
               label: label.to_string(),
               kind,
               required: RequiredRule::Never,
               constraints: FieldConstraints::default(),
               default: None }
    }

    /// Marca el campo como siempre obligatorio.
    pub fn required(mut self) -> Self {
        self.required = RequiredRule::Always;
        self
    }

    /// Obligatorio sólo cuando el predicado se cumple sobre los valores
    /// actuales (p. ej. "company_name requerido si person_type=COMPANY").
    pub fn required_when<F>(mut self, predicate: F) -> Self
        where F: Fn(&FormValues) -> bool + Send + Sync + 'static
    {
        self.required = RequiredRule::When(Arc::new(predicate));
        self
    }

    /// Restringe valores string con una expresión regular.
    pub fn with_pattern(mut self, pattern: &str) -> Result<Self, DomainError> {
        let re = Regex::new(pattern).map_err(|e| DomainError::InvalidPattern(self.key.clone(), e.to_string()))?;
        self.constraints.pattern = Some(re);
        Ok(self)
    }

    /// Cotas numéricas (cualquiera de las dos puede omitirse).
    pub fn with_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.constraints.min = min;
        self.constraints.max = max;
        self
    }

    /// Conjunto cerrado de opciones para Enum/MultiEnum.
    pub fn with_options<I, S>(mut self, options: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.constraints.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Valor inicial con el que se siembra la sesión.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn constraints(&self) -> &FieldConstraints {
        &self.constraints
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Evalúa la obligatoriedad contra los valores actuales.
    pub fn is_required(&self, values: &FormValues) -> bool {
        match &self.required {
            RequiredRule::Always => true,
            RequiredRule::Never => false,
            RequiredRule::When(p) => p(values),
        }
    }
}
