use serde::{Deserialize, Serialize};

/// Estado del autosave en tiempo de sesión.
///
/// Las transiciones válidas son:
/// - `Idle` -> `Saving` (se detectó un diff tras la ventana de debounce)
/// - `Saving` -> `Saved` (la petición parcial terminó bien)
/// - `Saving` -> `Failed` (error de transporte)
/// - `Saved` | `Failed` -> `Idle` (vencido el intervalo de exhibición)
/// - `Saved` | `Failed` -> `Saving` (el debounce de una edición posterior
///   venció dentro del intervalo de exhibición; el paso por `Idle` se omite)
///
/// No se permiten reversiones o saltos arbitrarios entre estados.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutosaveStatus {
    /// Sin actividad pendiente.
    Idle,
    /// Hay una petición parcial en vuelo (como máximo una por sesión).
    Saving,
    /// La última petición terminó bien; estado transitorio de exhibición.
    Saved,
    /// La última petición falló; estado transitorio de exhibición.
    Failed,
}
