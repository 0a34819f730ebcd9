//! Controlador de navegación: máquina de estados por paso.
//!
//! Avance con validación del paso que se abandona; retroceso incondicional.
//! La visibilidad se recalcula antes de mover el cursor porque la respuesta
//! recién dada puede ocultar o revelar pasos.
use log::debug;

use crate::errors::WizardError;
use crate::event::{EventStore, SessionEventKind};
use crate::session::state::{SessionPhase, WizardSession};
use crate::validation::{validate_step, ValidationErrors};

impl<E: EventStore> WizardSession<E> {
    /// Valida el paso actual: sus campos más las reglas cruzadas cuyo campo
    /// afectado pertenece a este paso.
    pub(crate) fn validate_current_step(&self) -> ValidationErrors {
        validate_step(self.definition(), self.current_step(), self.values())
    }

    /// Registra los errores de un intento de avance fallido y emite el
    /// evento correspondiente. El cursor no se mueve.
    fn record_step_failure(&mut self, errors: ValidationErrors) {
        let (position, _) = self.progress();
        let fields: Vec<String> = errors.keys().cloned().collect();
        debug!("step {} blocked by {} invalid field(s)", position, fields.len());
        self.errors = errors;
        self.emit(SessionEventKind::StepValidationFailed { step_index: position, fields });
    }

    /// Avanza al siguiente paso visible si el paso actual valida.
    ///
    /// `Ok(true)`: avanzó. `Ok(false)`: bloqueado, errores registrados por
    /// campo. `Err(NoFurtherStep)`: ya está en el último paso visible (ahí
    /// corresponde `submit`).
    pub fn next(&mut self) -> Result<bool, WizardError> {
        if self.phase() != SessionPhase::Editing {
            return Err(WizardError::SessionClosed);
        }

        let visible = self.visible_steps();
        let position = visible.iter().position(|&i| i == self.cursor).unwrap_or(0);
        if position + 1 >= visible.len() {
            return Err(WizardError::NoFurtherStep);
        }

        let errors = self.validate_current_step();
        if !errors.is_empty() {
            self.record_step_failure(errors);
            return Ok(false);
        }

        self.errors.clear();
        self.cursor = visible[position + 1];
        self.maybe_emit_progress();
        Ok(true)
    }

    /// Retrocede al paso visible anterior. Nunca valida; en el primer paso
    /// es un no-op (`Ok(false)`).
    pub fn previous(&mut self) -> Result<bool, WizardError> {
        if self.phase() != SessionPhase::Editing {
            return Err(WizardError::SessionClosed);
        }

        let visible = self.visible_steps();
        let position = visible.iter().position(|&i| i == self.cursor).unwrap_or(0);
        if position == 0 {
            return Ok(false);
        }
        self.cursor = visible[position - 1];
        self.maybe_emit_progress();
        Ok(true)
    }

    /// Salta a un paso visible arbitrario (índice sobre la lista visible).
    ///
    /// Hacia atrás es incondicional; hacia adelante exige que valide el paso
    /// que se abandona (no los intermedios). `Ok(false)`: bloqueado por
    /// validación.
    pub fn jump_to(&mut self, target: usize) -> Result<bool, WizardError> {
        if self.phase() != SessionPhase::Editing {
            return Err(WizardError::SessionClosed);
        }

        let visible = self.visible_steps();
        if target >= visible.len() {
            return Err(WizardError::InvalidStepIndex);
        }
        let position = visible.iter().position(|&i| i == self.cursor).unwrap_or(0);

        if target > position {
            let errors = self.validate_current_step();
            if !errors.is_empty() {
                self.record_step_failure(errors);
                return Ok(false);
            }
            self.errors.clear();
        }

        if target != position {
            self.cursor = visible[target];
            self.maybe_emit_progress();
        }
        Ok(true)
    }
}
