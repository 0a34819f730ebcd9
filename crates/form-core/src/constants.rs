//! Constantes de ajuste del motor.

/// Ventana de silencio tras la última edición antes de emitir un autosave.
pub const DEFAULT_DEBOUNCE_MS: u64 = 800;

/// Tiempo que el estado `Saved` permanece visible antes de volver a `Idle`.
pub const DEFAULT_SAVED_DISPLAY_MS: u64 = 2_000;

/// Tiempo que el estado `Failed` permanece visible antes de volver a `Idle`.
/// Más largo que el de éxito para que el usuario alcance a verlo.
pub const DEFAULT_FAILED_DISPLAY_MS: u64 = 5_000;
