use thiserror::Error;

/// Errores del modelo de dominio (construcción de wizards y acceso a campos).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("duplicate field key '{0}'")]
    DuplicateFieldKey(String),
    #[error("unknown field key '{0}'")]
    UnknownFieldKey(String),
    #[error("invalid pattern for field '{0}': {1}")]
    InvalidPattern(String, String),
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}
