//! Estado autoritativo de una sesión de wizard.
//!
//! Responsable de:
//! - Mantener los `FormValues` y despachar actualizaciones campo a campo.
//! - Recalcular la visibilidad de pasos en cada cambio (un paso condicional
//!   puede aparecer o desaparecer por la respuesta recién dada).
//! - Emitir los hitos observables al `EventStore` de la sesión.
//!
//! La sesión nace al montar el wizard y termina en `Completed` (submit
//! exitoso) o `Cancelled` (descarte). Es estado propio con ciclo de vida
//! definido, no estado ambiente compartido.
use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use form_domain::{DomainError, FormValues, StepDefinition, WizardDefinition};

use crate::autosave::{AutosaveConfig, AutosaveState};
use crate::errors::WizardError;
use crate::event::{EventStore, SessionEvent, SessionEventKind};
use crate::status::AutosaveStatus;
use crate::validation::ValidationErrors;

/// Fase de vida de la sesión.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// El usuario edita y navega libremente.
    Editing,
    /// Submit final en vuelo. Transitoria: vuelve a `Editing` si falla.
    Submitting,
    /// Terminal: la entidad final existe con este id.
    Completed(Uuid),
    /// Terminal: sesión descartada sin submit.
    Cancelled,
}

pub struct WizardSession<E: EventStore> {
    id: Uuid,
    definition: Arc<WizardDefinition>,
    event_store: E,
    pub(crate) values: FormValues,
    /// Subconjunto de valores confirmado como persistido y base del diff.
    pub(crate) snapshot: FormValues,
    touched: HashSet<String>,
    /// Índice del paso actual en la lista completa de la definición.
    /// Invariante: apunta a un paso visible mientras exista alguno.
    pub(crate) cursor: usize,
    phase: SessionPhase,
    pub(crate) errors: ValidationErrors,
    pub(crate) autosave: AutosaveState,
    pub(crate) autosave_cfg: AutosaveConfig,
    pub(crate) draft_id: Option<Uuid>,
    last_progress: (usize, usize),
}

impl<E: EventStore> WizardSession<E> {
    /// Abre una sesión: siembra defaults, posiciona el cursor en el primer
    /// paso visible y emite `SessionStarted` + `StepEntered`.
    ///
    /// Los defaults sembrados no cuentan como interacción: el autosave no
    /// dispara hasta la primera edición real.
    pub fn new(definition: Arc<WizardDefinition>, event_store: E, autosave_cfg: AutosaveConfig) -> Self {
        let values = definition.seed_values();
        let cursor = definition.steps()
                               .iter()
                               .position(|s| s.is_visible(&values))
                               .unwrap_or(0);

        let mut session = Self { id: Uuid::new_v4(),
                                 definition,
                                 event_store,
                                 values,
                                 snapshot: FormValues::new(),
                                 touched: HashSet::new(),
                                 cursor,
                                 phase: SessionPhase::Editing,
                                 errors: ValidationErrors::new(),
                                 autosave: AutosaveState::new(),
                                 autosave_cfg,
                                 draft_id: None,
                                 last_progress: (0, 0) };

        session.emit(SessionEventKind::SessionStarted { entity_kind: session.definition.entity_kind().to_string(),
                                                        step_count: session.definition.len() });
        let progress = session.progress();
        session.last_progress = progress;
        session.emit(SessionEventKind::StepEntered { step_index: progress.0, visible_steps: progress.1 });
        session
    }

    pub(crate) fn emit(&mut self, kind: SessionEventKind) -> SessionEvent {
        self.event_store.append_kind(self.id, kind)
    }

    /// Actualiza un campo. No valida nada por sí mismo: registra el valor,
    /// marca el campo como tocado, arma el debounce del autosave y recalcula
    /// cursor/progreso por si la visibilidad cambió.
    pub fn set_field(&mut self, key: &str, value: Value, now: u64) -> Result<(), WizardError> {
        if self.phase != SessionPhase::Editing {
            return Err(WizardError::SessionClosed);
        }
        if self.definition.field(key).is_none() {
            return Err(DomainError::UnknownFieldKey(key.to_string()).into());
        }

        self.values.set(key, value);
        self.touched.insert(key.to_string());
        self.errors.shift_remove(key);
        self.autosave.note_edit(now, &self.autosave_cfg);
        self.reclamp_cursor();
        self.maybe_emit_progress();
        Ok(())
    }

    /// Pasos visibles para los valores actuales (índices sobre la lista
    /// completa, en orden original). Se recalcula en cada consulta porque la
    /// visibilidad puede depender de cualquier campo.
    pub fn visible_steps(&self) -> Vec<usize> {
        self.definition.steps()
                       .iter()
                       .enumerate()
                       .filter(|(_, s)| s.is_visible(&self.values))
                       .map(|(i, _)| i)
                       .collect()
    }

    /// Posición del cursor sobre la lista visible: (índice, total).
    pub fn progress(&self) -> (usize, usize) {
        let visible = self.visible_steps();
        let position = visible.iter().position(|&i| i == self.cursor).unwrap_or(0);
        (position, visible.len())
    }

    pub fn current_step(&self) -> &StepDefinition {
        &self.definition.steps()[self.cursor]
    }

    /// Si el paso actual dejó de ser visible, mueve el cursor al siguiente
    /// paso visible; si no hay, al anterior visible.
    pub(crate) fn reclamp_cursor(&mut self) {
        let visible = self.visible_steps();
        if visible.is_empty() || visible.contains(&self.cursor) {
            return;
        }
        if let Some(&next) = visible.iter().find(|&&i| i > self.cursor) {
            self.cursor = next;
        } else if let Some(&prev) = visible.iter().rev().find(|&&i| i < self.cursor) {
            self.cursor = prev;
        } else {
            self.cursor = visible[0];
        }
    }

    /// Emite `StepEntered` sólo cuando el par (posición, total) cambió.
    pub(crate) fn maybe_emit_progress(&mut self) {
        let progress = self.progress();
        if progress != self.last_progress {
            self.last_progress = progress;
            self.emit(SessionEventKind::StepEntered { step_index: progress.0, visible_steps: progress.1 });
        }
    }

    /// Descarta la sesión sin submit. El borrador ya persistido queda
    /// recuperable por su id; no se revierte nada.
    pub fn cancel(&mut self) -> Result<(), WizardError> {
        if self.phase != SessionPhase::Editing {
            return Err(WizardError::SessionClosed);
        }
        self.phase = SessionPhase::Cancelled;
        self.emit(SessionEventKind::SessionCancelled);
        Ok(())
    }

    pub(crate) fn set_phase(&mut self, phase: SessionPhase) {
        self.phase = phase;
    }

    pub fn session_id(&self) -> Uuid {
        self.id
    }

    pub fn definition(&self) -> &WizardDefinition {
        &self.definition
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn snapshot(&self) -> &FormValues {
        &self.snapshot
    }

    pub(crate) fn set_snapshot(&mut self, snapshot: FormValues) {
        self.snapshot = snapshot;
    }

    pub fn touched(&self, key: &str) -> bool {
        self.touched.contains(key)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn validation_errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn autosave_status(&self) -> AutosaveStatus {
        self.autosave.status()
    }

    pub fn draft_id(&self) -> Option<Uuid> {
        self.draft_id
    }

    /// Eventos emitidos por esta sesión, en orden de append.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.event_store.list(self.id)
    }
}
