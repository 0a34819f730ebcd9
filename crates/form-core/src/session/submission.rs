//! Controlador de submit final.
//!
//! Valida el formulario completo (sólo pasos visibles), y finaliza contra
//! el backend: promueve el borrador existente o crea la entidad final
//! directa. Exactamente uno de los dos caminos por submit. En fallo de
//! transporte los valores quedan intactos para reintentar sin reingreso.
use log::warn;
use uuid::Uuid;

use form_domain::FieldMap;

use crate::backend::DraftBackend;
use crate::errors::WizardError;
use crate::event::{EventStore, SessionEventKind};
use crate::session::state::{SessionPhase, WizardSession};
use crate::validation::validate_all;

impl<E: EventStore> WizardSession<E> {
    /// Payload de finalización: únicamente los campos cuyos pasos son
    /// visibles para los valores actuales. Un paso oculto jamás aporta
    /// campos a la entidad final.
    pub(crate) fn visible_payload(&self) -> FieldMap {
        let mut keys: Vec<&str> = Vec::new();
        for &i in &self.visible_steps() {
            keys.extend(self.definition().steps()[i].field_keys());
        }
        self.values().project(keys)
    }

    /// Submit final del wizard.
    ///
    /// `Ok(Some(id))`: entidad final creada/promovida; la sesión pasa a
    /// `Completed`. `Ok(None)`: validación global fallida; el cursor salta
    /// al primer paso con un campo inválido y los errores quedan
    /// registrados. `Err`: fallo de transporte, valores preservados.
    pub async fn submit<B: DraftBackend>(&mut self, backend: &B) -> Result<Option<Uuid>, WizardError> {
        if self.phase() != SessionPhase::Editing {
            return Err(WizardError::SessionClosed);
        }

        let errors = validate_all(self.definition(), self.values());
        if !errors.is_empty() {
            // Primer paso (en orden de definición) que contiene un campo inválido
            let visible = self.visible_steps();
            if let Some(&first_invalid) = visible.iter().find(|&&i| {
                self.definition().steps()[i].fields().iter().any(|f| errors.contains_key(f.key()))
            }) {
                self.cursor = first_invalid;
            }
            let (position, _) = self.progress();
            let fields: Vec<String> = errors.keys().cloned().collect();
            self.errors = errors;
            self.emit(SessionEventKind::StepValidationFailed { step_index: position, fields });
            self.maybe_emit_progress();
            return Ok(None);
        }

        self.errors.clear();
        self.set_phase(SessionPhase::Submitting);
        self.emit(SessionEventKind::SubmissionStarted);

        let payload = self.visible_payload();
        match backend.finalize(self.draft_id, &payload).await {
            Ok(final_id) => {
                self.set_phase(SessionPhase::Completed(final_id));
                self.emit(SessionEventKind::SessionCompleted { final_id });
                Ok(Some(final_id))
            }
            Err(e) => {
                warn!("finalize failed for session {}: {}", self.session_id(), e);
                self.set_phase(SessionPhase::Editing);
                self.emit(SessionEventKind::SubmissionFailed { error: e.to_string() });
                Err(e.into())
            }
        }
    }
}
