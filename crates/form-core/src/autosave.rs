//! Máquina de estados del autosave: debounce + diff contra snapshot.
//!
//! El autosave es persistencia best-effort, no bloqueante: tras una ventana
//! de silencio desde la última edición calcula `diff = valores \ snapshot` y
//! emite a lo sumo una petición parcial en vuelo por sesión. No agenda
//! timers propios; el host (o el test) hace avanzar un reloj lógico en
//! milisegundos y llama `poll`.
//!
//! Invariantes:
//! - diff vacío => no se emite petición (ni tráfico ni cambio de estado);
//! - nunca hay dos peticiones en vuelo: mientras `status = Saving`, `poll`
//!   no arma una nueva aunque el deadline haya vencido;
//! - el snapshot sólo avanza en `resolve_ok`, y avanza al valor capturado
//!   al emitir la petición: las ediciones hechas durante el vuelo quedan
//!   fuera y las recoge el ciclo siguiente;
//! - en fallo el snapshot no se toca, así el diff fallido se reenvía
//!   (unido a lo nuevo) en el próximo ciclo disparado por edición;
//! - ningún autosave antes de la primera interacción real (los defaults de
//!   inicialización no generan tráfico).
use uuid::Uuid;

use form_domain::{FieldMap, FormValues};

use crate::constants::{DEFAULT_DEBOUNCE_MS, DEFAULT_FAILED_DISPLAY_MS, DEFAULT_SAVED_DISPLAY_MS};
use crate::status::AutosaveStatus;

/// Ajustes de tiempo del autosave (milisegundos lógicos).
#[derive(Debug, Clone, Copy)]
pub struct AutosaveConfig {
    pub debounce_ms: u64,
    pub saved_display_ms: u64,
    pub failed_display_ms: u64,
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self { debounce_ms: DEFAULT_DEBOUNCE_MS,
               saved_display_ms: DEFAULT_SAVED_DISPLAY_MS,
               failed_display_ms: DEFAULT_FAILED_DISPLAY_MS }
    }
}

/// Petición parcial lista para enviarse al backend.
#[derive(Debug, Clone)]
pub struct SaveRequest {
    /// Id del borrador si ya existe; `None` fuerza una creación.
    pub draft_id: Option<Uuid>,
    /// Únicamente las claves cambiadas desde el último snapshot.
    pub payload: FieldMap,
}

pub struct AutosaveState {
    status: AutosaveStatus,
    debounce_deadline: Option<u64>,
    revert_at: Option<u64>,
    /// Valores capturados al emitir la petición en vuelo; serán el nuevo
    /// snapshot si la petición termina bien.
    in_flight: Option<FormValues>,
    interacted: bool,
}

impl AutosaveState {
    pub fn new() -> Self {
        Self { status: AutosaveStatus::Idle,
               debounce_deadline: None,
               revert_at: None,
               in_flight: None,
               interacted: false }
    }

    pub fn status(&self) -> AutosaveStatus {
        self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Registra una edición real del usuario y (re)arma el debounce.
    pub fn note_edit(&mut self, now: u64, cfg: &AutosaveConfig) {
        self.interacted = true;
        self.debounce_deadline = Some(now + cfg.debounce_ms);
    }

    /// Revierte los estados de exhibición (`Saved`/`Failed`) a `Idle` cuando
    /// vence su intervalo. Devuelve `true` si hubo cambio de estado.
    pub fn tick_display(&mut self, now: u64) -> bool {
        if matches!(self.status, AutosaveStatus::Saved | AutosaveStatus::Failed) {
            if let Some(at) = self.revert_at {
                if now >= at {
                    self.status = AutosaveStatus::Idle;
                    self.revert_at = None;
                    return true;
                }
            }
        }
        false
    }

    /// Decide si corresponde emitir una petición parcial en `now`.
    ///
    /// Devuelve la petición (y transiciona a `Saving`) sólo cuando: ya hubo
    /// interacción, el deadline venció, no hay otra petición en vuelo y el
    /// diff contra el snapshot no es vacío. Un deadline vencido con diff
    /// vacío se consume sin emitir nada (el timer puede dispararse por
    /// causas ajenas a una edición real).
    pub fn poll(&mut self,
                now: u64,
                values: &FormValues,
                snapshot: &FormValues,
                draft_id: Option<Uuid>)
                -> Option<SaveRequest> {
        if self.status == AutosaveStatus::Saving || !self.interacted {
            return None;
        }
        let deadline = self.debounce_deadline?;
        if now < deadline {
            return None;
        }
        self.debounce_deadline = None;

        let payload = values.diff_against(snapshot);
        if payload.is_empty() {
            return None;
        }

        self.status = AutosaveStatus::Saving;
        self.in_flight = Some(values.clone());
        Some(SaveRequest { draft_id, payload })
    }

    /// La petición en vuelo terminó bien: devuelve el nuevo snapshot (los
    /// valores capturados al emitirla) y pasa a `Saved`.
    pub fn resolve_ok(&mut self, now: u64, cfg: &AutosaveConfig) -> Option<FormValues> {
        let snapshot = self.in_flight.take()?;
        self.status = AutosaveStatus::Saved;
        self.revert_at = Some(now + cfg.saved_display_ms);
        Some(snapshot)
    }

    /// La petición en vuelo falló: el snapshot queda como estaba y el diff
    /// pendiente se reintentará con la próxima edición.
    pub fn resolve_err(&mut self, now: u64, cfg: &AutosaveConfig) {
        self.in_flight = None;
        self.status = AutosaveStatus::Failed;
        self.revert_at = Some(now + cfg.failed_display_ms);
    }
}

impl Default for AutosaveState {
    fn default() -> Self {
        Self::new()
    }
}
