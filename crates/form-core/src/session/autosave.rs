//! Conductor del autosave sobre la sesión.
//!
//! `autosave_tick` es el camino normal (poll + petición al backend +
//! resolución en un solo paso). Los métodos `poll_autosave` /
//! `resolve_autosave_*` quedan expuestos para que el host o los tests
//! intercalen ediciones entre la emisión y la resolución de una petición,
//! reproduciendo el vuelo concurrente sin timers reales.
//!
//! Los errores de transporte son silenciosos por diseño del autosave:
//! nunca llegan como `Err` al llamador, sólo como evento y badge.
use log::{debug, warn};
use uuid::Uuid;

use crate::autosave::SaveRequest;
use crate::backend::DraftBackend;
use crate::event::{EventStore, SessionEventKind};
use crate::session::state::{SessionPhase, WizardSession};
use crate::status::AutosaveStatus;

impl<E: EventStore> WizardSession<E> {
    /// Decide si corresponde emitir una petición parcial en `now`.
    /// Maneja también la reversión de los estados de exhibición.
    pub fn poll_autosave(&mut self, now: u64) -> Option<SaveRequest> {
        if self.phase() != SessionPhase::Editing {
            return None;
        }
        if self.autosave.tick_display(now) {
            self.emit(SessionEventKind::AutosaveStatusChanged { status: AutosaveStatus::Idle });
        }

        let request = self.autosave.poll(now, &self.values, &self.snapshot, self.draft_id)?;
        self.emit(SessionEventKind::AutosaveStatusChanged { status: AutosaveStatus::Saving });
        debug!("autosave request armed: {} field(s), draft={:?}", request.payload.len(), request.draft_id);
        Some(request)
    }

    /// La petición en vuelo terminó bien. Adopta el id devuelto si la
    /// sesión aún no tenía borrador (el primer autosave lo crea).
    pub fn resolve_autosave_ok(&mut self, now: u64, draft_id: Uuid, keys: Vec<String>) {
        if self.draft_id.is_none() {
            self.draft_id = Some(draft_id);
            self.emit(SessionEventKind::DraftCreated { draft_id });
        }
        if let Some(snapshot) = self.autosave.resolve_ok(now, &self.autosave_cfg) {
            self.set_snapshot(snapshot);
        }
        self.emit(SessionEventKind::DraftSaved { draft_id, keys });
        self.emit(SessionEventKind::AutosaveStatusChanged { status: AutosaveStatus::Saved });
    }

    /// La petición en vuelo falló. El snapshot no avanza: el diff fallido
    /// se reenviará (unido a lo nuevo) en el próximo ciclo por edición.
    pub fn resolve_autosave_err(&mut self, now: u64, error: String) {
        warn!("autosave failed for session {}: {}", self.session_id(), error);
        self.autosave.resolve_err(now, &self.autosave_cfg);
        self.emit(SessionEventKind::DraftSaveFailed { error });
        self.emit(SessionEventKind::AutosaveStatusChanged { status: AutosaveStatus::Failed });
    }

    /// Ciclo completo de autosave: poll, petición al backend y resolución.
    /// Primer ciclo sin borrador: `create_draft`; siguientes: `update_draft`.
    pub async fn autosave_tick<B: DraftBackend>(&mut self, backend: &B, now: u64) {
        let Some(request) = self.poll_autosave(now) else {
            return;
        };
        let keys: Vec<String> = request.payload.keys().cloned().collect();

        let outcome = match request.draft_id {
            None => backend.create_draft(self.definition().entity_kind(), &request.payload).await,
            Some(id) => backend.update_draft(id, &request.payload).await.map(|_| id),
        };

        match outcome {
            Ok(draft_id) => self.resolve_autosave_ok(now, draft_id, keys),
            Err(e) => self.resolve_autosave_err(now, e.to_string()),
        }
    }
}
