//! Errores específicos del motor de sesión (simples por ahora).

use thiserror::Error;

use crate::backend::BackendError;
use form_domain::DomainError;

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("session is no longer editable")] SessionClosed,
    #[error("no further visible step")] NoFurtherStep,
    #[error("invalid step index")] InvalidStepIndex,
    #[error(transparent)] Domain(#[from] DomainError),
    #[error("backend: {0}")] Backend(#[from] BackendError),
    #[error("internal: {0}")] Internal(String),
}
