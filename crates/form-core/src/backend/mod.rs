//! Puerto de persistencia de borradores.
//!
//! El motor no conoce el almacenamiento real: consume tres operaciones
//! abstractas (crear borrador, guardado parcial, finalizar). El contrato de
//! merge para guardados parciales es a nivel de campo (última escritura
//! gana por clave), nunca reemplazo del documento completo; un autosave en
//! vuelo compitiendo con un submit no puede revertir campos ya finalizados.
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use form_domain::FieldMap;

pub use memory::{DraftRecord, FailingDraftBackend, InMemoryDraftBackend};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("draft not found: {0}")]
    DraftNotFound(Uuid),
    #[error("draft already finalized: {0}")]
    AlreadyFinalized(Uuid),
    #[error("transport: {0}")]
    Transport(String),
}

/// Colaborador de almacenamiento para borradores y entidades finales.
#[async_trait]
pub trait DraftBackend: Send + Sync {
    /// Crea un borrador con los campos iniciales y devuelve su id estable.
    /// Lo invoca el primer ciclo de autosave cuando aún no existe borrador.
    async fn create_draft(&self, entity_kind: &str, fields: &FieldMap) -> Result<Uuid, BackendError>;

    /// Guardado parcial sobre un borrador existente (merge por campo).
    async fn update_draft(&self, draft_id: Uuid, fields: &FieldMap) -> Result<(), BackendError>;

    /// Promueve un borrador a entidad final, o crea la entidad directamente
    /// cuando `draft_id` es `None`. Todo-o-nada: no hay finalización parcial.
    async fn finalize(&self, draft_id: Option<Uuid>, fields: &FieldMap) -> Result<Uuid, BackendError>;
}
