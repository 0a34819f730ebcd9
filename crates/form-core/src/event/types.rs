//! Tipos de evento de sesión y estructura `SessionEvent`.
//!
//! Rol en el motor:
//! - Cada sesión de wizard emite eventos a un `EventStore` append-only.
//! - Los hitos que el host observa (progreso, estado del autosave,
//!   completado, cancelado) son eventos, no callbacks: el host los consume
//!   del log y decide cómo presentarlos.
//! - El enum `SessionEventKind` define el contrato observable del motor.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::status::AutosaveStatus;

/// Eventos observables de una sesión de wizard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// Apertura de la sesión. Invariante: debe ser el primer evento de un
    /// `session_id`.
    SessionStarted { entity_kind: String, step_count: usize },
    /// El cursor entró a un paso visible (o el total de pasos visibles
    /// cambió por una respuesta previa). Índices sobre la lista visible.
    StepEntered { step_index: usize, visible_steps: usize },
    /// La validación del paso actual bloqueó un avance o un submit.
    StepValidationFailed { step_index: usize, fields: Vec<String> },
    /// Cambio de estado del autosave (badge transitorio en el host).
    AutosaveStatusChanged { status: AutosaveStatus },
    /// El primer ciclo de autosave creó el borrador y la sesión adoptó su id.
    DraftCreated { draft_id: Uuid },
    /// Un autosave parcial terminó bien; `keys` son las claves enviadas.
    DraftSaved { draft_id: Uuid, keys: Vec<String> },
    /// Un autosave parcial falló. No bloquea edición ni navegación.
    DraftSaveFailed { error: String },
    /// Comenzó el submit final (validación global superada).
    SubmissionStarted,
    /// El submit final falló en transporte; los valores quedan intactos.
    SubmissionFailed { error: String },
    /// Cierre exitoso: el borrador fue promovido (o creado) como entidad
    /// final. Evento terminal junto con `SessionCancelled`.
    SessionCompleted { final_id: Uuid },
    /// La sesión se descartó sin submit. El borrador persistido no se
    /// revierte; su limpieza o reanudación es responsabilidad del host.
    SessionCancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub seq: u64, // asignado por el EventStore (orden de append)
    pub session_id: Uuid,
    pub kind: SessionEventKind,
    pub ts: DateTime<Utc>, // metadato (nunca participa en la lógica)
}
